//! Bottom-up propagation of satisfaction through a term tree.
//!
//! The evaluator never removes nodes from a [`Combination`] — it only adds
//! them — which is what makes the DFA construction in [`crate::dfa`]
//! terminate and each compiled DFA acyclic in its progression toward `hit`.

use crate::combination::Combination;
use crate::navigator::{NodeId, Navigator};

/// Called when match term `node` has just been observed. Adds it to `state`
/// and propagates the change to its parent.
///
/// # Panics
///
/// Panics if `node` is not a match term. Only the DFA builder calls this,
/// and only with match-term ids it discovered via [`Navigator::match_terms`],
/// so this can never be triggered through the public API.
pub fn activate(nav: &Navigator, state: &mut Combination, node: NodeId) {
    assert!(
        nav.is_match(node),
        "activate called on a non-match node (invariant violation)"
    );

    if state.contains(node) {
        return;
    }
    state.add(node);
    if let Some(parent) = nav.parent(node) {
        evaluate(nav, state, parent);
    }
}

/// Called when some child of `node` just became satisfied, to propagate the
/// change upward through AND/OR ancestors.
pub fn evaluate(nav: &Navigator, state: &mut Combination, node: NodeId) {
    if state.contains(node) {
        return;
    }

    let satisfied = if nav.is_and(node) {
        nav.children(node).iter().all(|&child| state.contains(child))
    } else if nav.is_or(node) {
        nav.children(node).iter().any(|&child| state.contains(child))
    } else {
        // NOT is resolved only at end-of-stream; match terms are only
        // ever added by `activate`.
        false
    };

    if satisfied {
        state.add(node);
        if let Some(parent) = nav.parent(node) {
            evaluate(nav, state, parent);
        }
    }
}

/// End-of-stream propagation, started once on the navigator's root.
///
/// NOT has no positive evidence during the stream; it can only be decided
/// once no further tokens can arrive. This walks the tree top-down but
/// resolves each NOT only after its child has had a chance to resolve,
/// which is the post-order behavior the term tree's own walk would produce.
pub fn end_propagate(nav: &Navigator, state: &mut Combination, node: NodeId) {
    if nav.is_and(node) || nav.is_or(node) {
        for &child in nav.children(node) {
            end_propagate(nav, state, child);
        }
    } else if nav.is_not(node) {
        if state.contains(node) {
            return;
        }
        let child = nav.not_child(node);
        end_propagate(nav, state, child);
        if state.contains(child) {
            return;
        }
        state.add(node);
        if let Some(parent) = nav.parent(node) {
            evaluate(nav, state, parent);
        }
    }
    // Match terms have no effect at end-of-stream.
}
