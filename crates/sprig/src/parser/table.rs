//! LL(1) parse-table construction.
//!
//! Rows are nonterminals, columns are the terminals plus the end-of-input
//! marker. Each production lands in the cells named by its predict set; a
//! cell holding more than one rule index is a conflict.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use super::first::first_of_sequence;
use super::symbols::Lookahead;

/// The predictive parse table with its row and column indices.
#[derive(Debug, Clone)]
pub struct Table {
    /// Row-major: `cells[row][col]` is a set of rule indices.
    pub cells: Vec<Vec<BTreeSet<usize>>>,
    pub rows: IndexMap<String, usize>,
    pub cols: IndexMap<Lookahead, usize>,
}

/// Populate the table from the predict set of every rule.
pub fn build(
    terminals: &IndexSet<String>,
    nonterminals: &IndexSet<String>,
    first: &IndexMap<String, BTreeSet<Lookahead>>,
    follow: &IndexMap<String, BTreeSet<Lookahead>>,
    rules: &[(String, Vec<String>)],
) -> Table {
    let rows: IndexMap<String, usize> = nonterminals
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), i))
        .collect();
    let cols: IndexMap<Lookahead, usize> = terminals
        .iter()
        .map(Lookahead::terminal)
        .chain([Lookahead::EndOfInput])
        .enumerate()
        .map(|(i, t)| (t, i))
        .collect();

    let mut cells = vec![vec![BTreeSet::new(); cols.len()]; rows.len()];
    for (rule, (nonterminal, sequence)) in rules.iter().enumerate() {
        let mut predict = first_of_sequence(sequence, first);
        if predict.remove(&Lookahead::Epsilon) {
            predict.extend(follow[nonterminal.as_str()].iter().cloned());
        }
        for lookahead in predict {
            cells[rows[nonterminal.as_str()]][cols[&lookahead]].insert(rule);
        }
    }

    Table { cells, rows, cols }
}
