//! Compiles one indicator's term tree into a deterministic finite-state
//! machine: exhaustive subset enumeration, transition derivation via the
//! evaluator, flattening, and pruning to unreachable/non-accepting states.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::combination::Combination;
use crate::evaluator;
use crate::indicator::Token;
use crate::navigator::{NodeId, Navigator};
use crate::subset;

/// Pre-activation state name.
pub const INIT: &str = "init";
/// Accepting state name.
pub const HIT: &str = "hit";
/// Dead state name: entered from states provably unable to reach `HIT`.
pub const FAIL: &str = "fail";

/// A single build-form transition: a set of tokens driving the same state
/// change. Produced one token at a time by [`derive_transitions`] and
/// merged by [`flatten`].
#[derive(Debug, Clone)]
struct Transition {
    current: String,
    tokens: Vec<Token>,
    next: String,
}

/// A deterministic finite automaton compiled from one indicator, in its
/// runtime form: `(state, token) -> state`.
///
/// No entry for a `(state, token)` pair means "no transition" — the
/// collection runtime leaves the DFA in its current state.
#[derive(Debug, Clone)]
pub struct Dfa {
    // An IndexMap keeps transitions in discovery order, so `entries()`
    // reads in the same order the subset enumeration produced them rather
    // than an arbitrary hash order — handy for reproducible dumps.
    map: IndexMap<(String, Token), String>,
    activators: IndexSet<Token>,
}

impl Dfa {
    /// Looks up the next state for `(state, token)`, if any transition
    /// exists.
    #[must_use]
    pub fn lookup(&self, state: &str, token: &Token) -> Option<&str> {
        self.map.get(&(state.to_string(), token.clone())).map(String::as_str)
    }

    /// Every `(current, token) -> next` entry, for dump/debug use.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Token, &str)> {
        self.map
            .iter()
            .map(|((current, token), next)| (current.as_str(), token, next.as_str()))
    }

    /// The tokens that appear on some transition whose source is `INIT` —
    /// the tokens that take this DFA out of the inactive state. Computed
    /// once at compile time.
    #[must_use]
    pub fn activators(&self) -> &IndexSet<Token> {
        &self.activators
    }
}

/// Compiles a term tree's navigator into a [`Dfa`], or `None` if no `hit`
/// state survives pruning (a degenerate indicator that can never fire).
#[must_use]
pub fn compile(nav: &Navigator) -> Option<Dfa> {
    let basic_nodes: Vec<NodeId> = nav.basic_nodes().iter().copied().collect();
    let basic_set: HashSet<NodeId> = basic_nodes.iter().copied().collect();
    let subsets = subset::enumerate_subsets(&basic_nodes);

    let transitions = derive_transitions(nav, &subsets, &basic_set);
    let flattened = flatten(transitions);
    let pruned = prune(flattened);

    // Pruning only keeps transitions whose `current` is reachable from
    // `INIT`, so any surviving transition into `HIT` proves `HIT` is
    // reachable; if none survives, the indicator can never fire.
    if !pruned.iter().any(|t| t.next == HIT) {
        return None;
    }

    Some(mapify(pruned))
}

/// For every basic-node subset and every match term (or the end token),
/// computes the resulting state and emits a transition if it differs from
/// the starting state.
fn derive_transitions(
    nav: &Navigator,
    subsets: &[Combination],
    basic_set: &HashSet<NodeId>,
) -> Vec<Transition> {
    let root = nav.root();
    let mut transitions = Vec::new();

    for subset in subsets {
        let current_name = name_combination(subset, nav);

        for &term in nav.match_terms() {
            let mut next_state = subset.clone();
            evaluator::activate(nav, &mut next_state, term);
            let restricted = restrict_to_basic_and_root(&next_state, basic_set, root);
            let next_name = name_combination(&restricted, nav);

            if next_name != current_name {
                let (r#type, value) = nav.match_pair(term);
                transitions.push(Transition {
                    current: current_name.clone(),
                    tokens: vec![Token::new(r#type, value)],
                    next: next_name,
                });
            }
        }

        let mut end_state = subset.clone();
        evaluator::end_propagate(nav, &mut end_state, root);
        let end_name = name_combination(&end_state, nav);
        if end_name != current_name {
            transitions.push(Transition {
                current: current_name,
                tokens: vec![Token::end()],
                next: end_name,
            });
        }
    }

    transitions
}

/// Restricts a combination to basic nodes, keeping the root too if it
/// entered the combination (so `name_combination` can still report `hit`
/// for a non-basic root satisfied purely through AND/OR propagation).
fn restrict_to_basic_and_root(
    combination: &Combination,
    basic_set: &HashSet<NodeId>,
    root: NodeId,
) -> Combination {
    combination
        .iter()
        .filter(|id| *id == root || basic_set.contains(id))
        .collect()
}

/// Converts a combination of basic nodes into its canonical DFA state name.
#[must_use]
fn name_combination(combination: &Combination, nav: &Navigator) -> String {
    if combination.contains(nav.root()) {
        return HIT.to_string();
    }
    if combination.is_empty() {
        return INIT.to_string();
    }

    let mut ids: Vec<NodeId> = combination.iter().collect();
    ids.sort_unstable();

    let mut name = String::from("s");
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            name.push('-');
        }
        // drop the navigator label's leading "s", keep only the number.
        name.push_str(&(id + 1).to_string());
    }
    name
}

/// Groups transitions by `(current, next)`, merging their token sets into
/// one transition whose token list is the union.
fn flatten(transitions: Vec<Transition>) -> Vec<Transition> {
    let mut grouped: HashMap<(String, String), Vec<Token>> = HashMap::new();
    for transition in transitions {
        let entry = grouped
            .entry((transition.current, transition.next))
            .or_default();
        for token in transition.tokens {
            if !entry.contains(&token) {
                entry.push(token);
            }
        }
    }

    grouped
        .into_iter()
        .map(|((current, next), tokens)| Transition {
            current,
            tokens,
            next,
        })
        .collect()
}

/// Removes unreachable and non-accepting transitions:
/// - backward reachability from `HIT` determines which `next` states
///   survive as-is; anything else is rewritten to `FAIL`.
/// - forward reachability from `INIT` determines which `current` states
///   are kept at all; transitions starting elsewhere are dropped.
fn prune(transitions: Vec<Transition>) -> Vec<Transition> {
    let mut can_reach_hit: HashSet<String> = HashSet::from([HIT.to_string()]);
    loop {
        let before = can_reach_hit.len();
        for t in &transitions {
            if can_reach_hit.contains(&t.next) {
                can_reach_hit.insert(t.current.clone());
            }
        }
        if can_reach_hit.len() == before {
            break;
        }
    }

    let mut reachable_from_init: HashSet<String> = HashSet::from([INIT.to_string()]);
    loop {
        let before = reachable_from_init.len();
        for t in &transitions {
            if reachable_from_init.contains(&t.current) {
                reachable_from_init.insert(t.next.clone());
            }
        }
        if reachable_from_init.len() == before {
            break;
        }
    }

    transitions
        .into_iter()
        .filter(|t| reachable_from_init.contains(&t.current))
        .map(|mut t| {
            if !can_reach_hit.contains(&t.next) {
                t.next = FAIL.to_string();
            }
            t
        })
        .collect()
}

/// Flattens the build-form transition list into the runtime lookup map and
/// precomputes the activator set.
fn mapify(transitions: Vec<Transition>) -> Dfa {
    let mut map = IndexMap::new();
    let mut activators = IndexSet::new();

    for t in transitions {
        for token in t.tokens {
            if t.current == INIT {
                activators.insert(token.clone());
            }
            map.insert((t.current.clone(), token), t.next.clone());
        }
    }

    Dfa { map, activators }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn compile_term(term: &Term) -> Option<Dfa> {
        let nav = Navigator::build(term);
        compile(&nav)
    }

    #[test]
    fn and_of_two_matches_hits_regardless_of_order() {
        let term = Term::and(vec![
            Term::match_term("tcp", "80"),
            Term::match_term("url", "http://x/m.dat"),
        ]);
        let dfa = compile_term(&term).unwrap();

        let mut state = INIT.to_string();
        for token in [Token::new("tcp", "80"), Token::new("url", "http://x/m.dat")] {
            state = dfa.lookup(&state, &token).unwrap_or(&state).to_string();
        }
        assert_eq!(state, HIT);
    }

    #[test]
    fn single_match_root_connects_init_to_hit_directly() {
        let term = Term::match_term("a", "1");
        let dfa = compile_term(&term).unwrap();
        assert_eq!(dfa.lookup(INIT, &Token::new("a", "1")), Some(HIT));
    }

    #[test]
    fn not_without_evidence_fires_only_at_end() {
        let term = Term::and(vec![
            Term::match_term("user", "alice"),
            Term::not(Term::match_term("action", "approved")),
        ]);
        let dfa = compile_term(&term).unwrap();

        let mut state = INIT.to_string();
        state = dfa
            .lookup(&state, &Token::new("user", "alice"))
            .unwrap_or(&state)
            .to_string();
        state = dfa.lookup(&state, &Token::end()).unwrap_or(&state).to_string();
        assert_eq!(state, HIT);
    }

    #[test]
    fn not_is_suppressed_once_its_child_fires() {
        let term = Term::and(vec![
            Term::match_term("user", "alice"),
            Term::not(Term::match_term("action", "approved")),
        ]);
        let dfa = compile_term(&term).unwrap();

        let mut state = INIT.to_string();
        for token in [
            Token::new("user", "alice"),
            Token::new("action", "approved"),
            Token::end(),
        ] {
            state = dfa.lookup(&state, &token).unwrap_or(&state).to_string();
        }
        assert_eq!(state, FAIL);
    }

    #[test]
    fn fail_state_has_no_outgoing_transitions() {
        let term = Term::and(vec![
            Term::match_term("user", "alice"),
            Term::not(Term::match_term("action", "approved")),
        ]);
        let dfa = compile_term(&term).unwrap();
        assert!(dfa.entries().all(|(current, _, _)| current != FAIL));
    }

    #[test]
    fn degenerate_indicator_with_no_reachable_hit_compiles_to_none() {
        // A childless AND as the root can never become satisfied: nothing
        // ever activates it, since it has no match-term descendants to
        // raise the event. The term tree itself doesn't forbid this shape
        // (only the JSON loader requires non-empty AND/OR children); the
        // compiler must still degrade gracefully rather than panic.
        let term = Term::And(vec![]);
        assert!(compile_term(&term).is_none());
    }
}
