//! NFA union.
//!
//! Merges the per-token fragments under one fresh start state whose only
//! outgoing edges are epsilons into each fragment's start.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::ids::StateId;

use super::thompson::NfaFragment;

/// The union of all per-token fragments.
#[derive(Debug, Clone)]
pub struct MergedNfa {
    pub states: HashSet<StateId>,
    pub alphabet: HashSet<char>,
    pub transitions: Vec<(StateId, char, StateId)>,
    pub epsilon: HashMap<StateId, HashSet<StateId>>,
    pub start: StateId,
    pub finals: HashSet<StateId>,
    /// Token name to that token's final state, in expression order.
    pub token_finals: IndexMap<String, StateId>,
}

/// Merge `fragments` under a fresh start state.
pub fn merge(fragments: Vec<NfaFragment>) -> MergedNfa {
    let start = StateId::fresh();
    let mut merged = MergedNfa {
        states: HashSet::from([start]),
        alphabet: HashSet::new(),
        transitions: Vec::new(),
        epsilon: HashMap::new(),
        start,
        finals: HashSet::new(),
        token_finals: IndexMap::new(),
    };

    for frag in fragments {
        merged.states.extend(frag.states);
        merged.alphabet.extend(frag.alphabet);
        merged.transitions.extend(frag.transitions);
        merged.epsilon.entry(start).or_default().insert(frag.start);
        for (from, targets) in frag.epsilon {
            merged.epsilon.entry(from).or_default().extend(targets);
        }
        merged.finals.insert(frag.finish);
        merged.token_finals.insert(frag.token, frag.finish);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::super::symbol::Symbol;
    use super::super::thompson::build;
    use super::*;

    #[test]
    fn fresh_start_branches_to_every_fragment() {
        let a = build("a", &[Symbol::Char('a')]).unwrap();
        let b = build("b", &[Symbol::Char('b')]).unwrap();
        let (a_start, b_start) = (a.start, b.start);

        let merged = merge(vec![a, b]);
        assert_eq!(merged.epsilon[&merged.start].len(), 2);
        assert!(merged.epsilon[&merged.start].contains(&a_start));
        assert!(merged.epsilon[&merged.start].contains(&b_start));
        assert_eq!(merged.finals.len(), 2);
        assert_eq!(merged.token_finals.len(), 2);
        assert_eq!(merged.states.len(), 5);
        assert_eq!(merged.transitions.len(), 2);
    }
}
