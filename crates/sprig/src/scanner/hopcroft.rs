//! DFA minimization by partition refinement.
//!
//! Starts from the accepting/non-accepting split and refines until no
//! selector splits any part. The quotient keeps one state per part; the type
//! map is rebuilt from the old finals, with the sink entry preserved so
//! consumers can still locate the error state.

use std::collections::{BTreeSet, HashMap};

use indexmap::{IndexMap, IndexSet};

use super::totalize::TotalDfa;
use super::SINK_TYPE;

/// The minimized DFA; each state is a partition of pre-merge dense indices.
#[derive(Debug, Clone)]
pub struct Quotient {
    pub partitions: Vec<BTreeSet<usize>>,
    pub alphabet: IndexSet<char>,
    pub table: Vec<Vec<usize>>,
    pub start: usize,
    pub finals: BTreeSet<usize>,
    pub token_finals: IndexMap<String, BTreeSet<usize>>,
}

/// Merge nondistinguishable states of `dfa`.
pub fn minimize(dfa: &TotalDfa) -> Quotient {
    let n = dfa.states.len();
    let finals = dfa.finals.clone();
    let nonfinals: BTreeSet<usize> = (0..n).filter(|q| !finals.contains(q)).collect();

    let mut partitions: Vec<BTreeSet<usize>> = Vec::new();
    if !finals.is_empty() {
        partitions.push(finals.clone());
    }
    if !nonfinals.is_empty() {
        partitions.push(nonfinals);
    }

    let mut work: Vec<BTreeSet<usize>> = vec![finals];
    while let Some(selector) = work.pop() {
        for v in 0..dfa.alphabet.len() {
            // States whose v-successor lands in the selector.
            let moved: BTreeSet<usize> =
                (0..n).filter(|&q| selector.contains(&dfa.table[v][q])).collect();

            let mut refined: Vec<BTreeSet<usize>> = Vec::new();
            for part in &partitions {
                let inside: BTreeSet<usize> = part.intersection(&moved).copied().collect();
                let outside: BTreeSet<usize> = part.difference(&moved).copied().collect();
                if inside.is_empty() || outside.is_empty() {
                    refined.push(part.clone());
                    continue;
                }

                if let Some(pos) = work.iter().position(|w| w == part) {
                    work.swap_remove(pos);
                    work.push(inside.clone());
                    work.push(outside.clone());
                } else if inside.len() <= outside.len() {
                    work.push(inside.clone());
                } else {
                    work.push(outside.clone());
                }
                refined.push(inside);
                refined.push(outside);
            }
            partitions = refined;
        }
    }

    // Quotient: one state per part, transitions taken from any representative.
    let part_of: HashMap<usize, usize> = partitions
        .iter()
        .enumerate()
        .flat_map(|(i, part)| part.iter().map(move |&q| (q, i)))
        .collect();

    let mut table = vec![vec![0usize; partitions.len()]; dfa.alphabet.len()];
    for (i, part) in partitions.iter().enumerate() {
        let Some(&q) = part.iter().next() else { continue };
        for (v, row) in table.iter_mut().enumerate() {
            row[i] = part_of[&dfa.table[v][q]];
        }
    }

    let finals: BTreeSet<usize> = partitions
        .iter()
        .enumerate()
        .filter(|(_, part)| part.iter().any(|q| dfa.finals.contains(q)))
        .map(|(i, _)| i)
        .collect();

    let mut token_finals = IndexMap::new();
    for (token, old) in &dfa.token_finals {
        let parts: BTreeSet<usize> = if token == SINK_TYPE {
            // The sink is not accepting; look across every partition.
            partitions
                .iter()
                .enumerate()
                .filter(|(_, part)| part.iter().any(|q| old.contains(q)))
                .map(|(i, _)| i)
                .collect()
        } else {
            finals
                .iter()
                .copied()
                .filter(|&i| partitions[i].iter().any(|q| old.contains(q)))
                .collect()
        };
        token_finals.insert(token.clone(), parts);
    }

    Quotient {
        partitions,
        alphabet: dfa.alphabet.clone(),
        table,
        start: part_of[&dfa.start],
        finals,
        token_finals,
    }
}
