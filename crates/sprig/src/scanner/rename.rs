//! Final state renaming.
//!
//! Swaps the partition keys accumulated through subset construction and
//! minimization for fresh opaque labels, so consumers see short stable names
//! with no set internals behind them.

use indexmap::{IndexMap, IndexSet};

use crate::ids::StateId;

use super::hopcroft::Quotient;

/// The consumer-facing DFA encoding.
#[derive(Debug, Clone)]
pub struct RenamedDfa {
    pub states: IndexSet<StateId>,
    pub alphabet: IndexSet<char>,
    pub state_index: IndexMap<StateId, usize>,
    pub sym_index: IndexMap<char, usize>,
    /// Symbol-major dense table over the renamed states.
    pub table: Vec<Vec<StateId>>,
    pub start: StateId,
    pub finals: IndexSet<StateId>,
    pub token_finals: IndexMap<String, IndexSet<StateId>>,
}

/// Rename every partition of `quotient` to a fresh label.
pub fn rename(quotient: &Quotient) -> RenamedDfa {
    let fresh: Vec<StateId> = quotient.partitions.iter().map(|_| StateId::fresh()).collect();

    let states: IndexSet<StateId> = fresh.iter().copied().collect();
    let state_index: IndexMap<StateId, usize> =
        fresh.iter().enumerate().map(|(i, &s)| (s, i)).collect();
    let sym_index: IndexMap<char, usize> = quotient
        .alphabet
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, i))
        .collect();
    let table: Vec<Vec<StateId>> = quotient
        .table
        .iter()
        .map(|row| row.iter().map(|&p| fresh[p]).collect())
        .collect();
    let finals: IndexSet<StateId> = quotient.finals.iter().map(|&p| fresh[p]).collect();
    let token_finals: IndexMap<String, IndexSet<StateId>> = quotient
        .token_finals
        .iter()
        .map(|(token, parts)| (token.clone(), parts.iter().map(|&p| fresh[p]).collect()))
        .collect();

    RenamedDfa {
        states,
        alphabet: quotient.alphabet.clone(),
        state_index,
        sym_index,
        table,
        start: fresh[quotient.start],
        finals,
        token_finals,
    }
}
