//! Enumerates every subset of a set of basic nodes — each subset is a
//! potential DFA state before pruning.

use crate::combination::Combination;
use crate::navigator::NodeId;

/// Returns all `2^n` subsets of `basic_nodes`, including the empty set.
///
/// Order is unspecified and duplicates never occur. `n` is expected to stay
/// small in practice (single digits); this is only used at compile time,
/// once per indicator.
#[must_use]
pub fn enumerate_subsets(basic_nodes: &[NodeId]) -> Vec<Combination> {
    let n = basic_nodes.len();
    // Guard against `1u32 << n` overflowing for absurdly large indicators;
    // real indicators never approach this, but the shift must stay defined.
    assert!(n < 32, "too many basic nodes to enumerate subsets ({n})");

    let count = 1usize << n;
    let mut subsets = Vec::with_capacity(count);
    for mask in 0..count {
        let combination: Combination = basic_nodes
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &id)| id)
            .collect();
        subsets.push(combination);
    }
    subsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_just_the_empty_set() {
        let subsets = enumerate_subsets(&[]);
        assert_eq!(subsets.len(), 1);
        assert!(subsets[0].is_empty());
    }

    #[test]
    fn n_nodes_yields_two_to_the_n_subsets() {
        let subsets = enumerate_subsets(&[1, 2, 3]);
        assert_eq!(subsets.len(), 8);

        let sizes: Vec<usize> = {
            let mut sizes: Vec<usize> = subsets.iter().map(Combination::len).collect();
            sizes.sort_unstable();
            sizes
        };
        assert_eq!(sizes, vec![0, 1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn no_duplicate_subsets() {
        let subsets = enumerate_subsets(&[10, 20]);
        let mut seen: Vec<Vec<NodeId>> = subsets
            .iter()
            .map(|c| {
                let mut v: Vec<NodeId> = c.iter().collect();
                v.sort_unstable();
                v
            })
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
