//! Transition-function totalization.
//!
//! Converts the sparse reachable transitions into a dense symbol-major table.
//! When some `(state, character)` pair has no transition, a fresh sink state
//! absorbs it and is recorded in the type map under [`SINK_TYPE`].

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use crate::ids::StateId;

use super::subset::SubsetDfa;
use super::SINK_TYPE;

/// A DFA with a total transition function as a dense `table[symbol][state]`.
#[derive(Debug, Clone)]
pub struct TotalDfa {
    /// Interned state keys; the sink, when present, is the last entry.
    pub states: Vec<BTreeSet<StateId>>,
    /// Column order of the table; fixed here, in code-point order.
    pub alphabet: IndexSet<char>,
    pub table: Vec<Vec<usize>>,
    pub start: usize,
    pub finals: BTreeSet<usize>,
    pub token_finals: IndexMap<String, BTreeSet<usize>>,
}

/// Make the transition function total.
pub fn totalize(dfa: SubsetDfa) -> TotalDfa {
    let SubsetDfa {
        mut states,
        alphabet,
        transitions,
        start,
        finals,
        mut token_finals,
    } = dfa;

    let total = transitions.len() == states.len() * alphabet.len();
    let sink = states.len();
    if !total {
        states.push(BTreeSet::from([StateId::fresh()]));
        token_finals.insert(SINK_TYPE.to_owned(), BTreeSet::from([sink]));
    }

    let mut alphabet: Vec<char> = alphabet.into_iter().collect();
    alphabet.sort_unstable();
    let alphabet: IndexSet<char> = alphabet.into_iter().collect();

    // When already total every cell is overwritten below, so the fill value
    // never survives.
    let fill = if total { start } else { sink };
    let mut table = vec![vec![fill; states.len()]; alphabet.len()];
    for (&(from, on), &to) in &transitions {
        let v = alphabet
            .get_index_of(&on)
            .expect("transition character missing from alphabet");
        table[v][from] = to;
    }

    TotalDfa {
        states,
        alphabet,
        table,
        start,
        finals,
        token_finals,
    }
}
