//! Subset construction.
//!
//! Builds the DFA reachable from the epsilon closure of the merged start
//! state. DFA states are closures (sets of NFA states), interned to dense
//! indices as they are discovered; closures are cached per NFA state.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;

use crate::ids::StateId;

use super::nfa::MergedNfa;

/// The reachable DFA, still keyed by closure sets and sparse transitions.
#[derive(Debug, Clone)]
pub struct SubsetDfa {
    /// Interned DFA states; the index is the dense state id.
    pub states: Vec<BTreeSet<StateId>>,
    pub alphabet: HashSet<char>,
    pub transitions: HashMap<(usize, char), usize>,
    pub start: usize,
    pub finals: BTreeSet<usize>,
    /// Token name to the DFA finals containing that token's NFA final.
    pub token_finals: IndexMap<String, BTreeSet<usize>>,
}

/// Reflexive-transitive closure of the epsilon relation from `q`, cached.
fn closure<'a>(
    epsilon: &HashMap<StateId, HashSet<StateId>>,
    cache: &'a mut HashMap<StateId, BTreeSet<StateId>>,
    q: StateId,
) -> &'a BTreeSet<StateId> {
    cache.entry(q).or_insert_with(|| {
        let mut seen = BTreeSet::new();
        let mut work = vec![q];
        while let Some(p) = work.pop() {
            if seen.insert(p)
                && let Some(next) = epsilon.get(&p)
            {
                work.extend(next.iter().copied());
            }
        }
        seen
    })
}

/// Construct the reachable DFA from `nfa`.
pub fn construct(nfa: &MergedNfa) -> SubsetDfa {
    let mut cache = HashMap::new();

    // Literal transitions indexed by source state.
    let mut by_source: HashMap<StateId, Vec<(char, StateId)>> = HashMap::new();
    for &(from, on, to) in &nfa.transitions {
        by_source.entry(from).or_default().push((on, to));
    }

    let start_set = closure(&nfa.epsilon, &mut cache, nfa.start).clone();
    let mut states = vec![start_set.clone()];
    let mut index: HashMap<BTreeSet<StateId>, usize> = HashMap::from([(start_set, 0)]);
    let mut transitions = HashMap::new();
    let mut finals = BTreeSet::new();
    let mut work = vec![0usize];

    while let Some(id) = work.pop() {
        let members = states[id].clone();
        if members.iter().any(|q| nfa.finals.contains(q)) {
            finals.insert(id);
        }

        // Bucket the one-step-then-close targets per input character.
        let mut buckets: BTreeMap<char, BTreeSet<StateId>> = BTreeMap::new();
        for q in &members {
            let Some(arcs) = by_source.get(q) else { continue };
            for &(on, to) in arcs {
                let reach = closure(&nfa.epsilon, &mut cache, to);
                buckets.entry(on).or_default().extend(reach.iter().copied());
            }
        }

        for (on, target) in buckets {
            let next = match index.get(&target) {
                Some(&i) => i,
                None => {
                    let i = states.len();
                    states.push(target.clone());
                    index.insert(target, i);
                    work.push(i);
                    i
                }
            };
            transitions.insert((id, on), next);
        }
    }

    let mut token_finals: IndexMap<String, BTreeSet<usize>> = IndexMap::new();
    for (token, nfa_final) in &nfa.token_finals {
        for &id in &finals {
            if states[id].contains(nfa_final) {
                token_finals.entry(token.clone()).or_default().insert(id);
            }
        }
    }

    SubsetDfa {
        states,
        alphabet: nfa.alphabet.clone(),
        transitions,
        start: 0,
        finals,
        token_finals,
    }
}
