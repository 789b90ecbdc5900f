//! FIRST-set computation.
//!
//! Least fixed point: terminals seed their own singletons, nonterminals
//! start empty, and each pass folds every rule's sequence-FIRST into its
//! left-hand side until nothing changes.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use super::symbols::Lookahead;

/// FIRST of a symbol sequence.
///
/// Seeds with epsilon, then walks the sequence: each symbol contributes its
/// FIRST set, and the walk stops at the first symbol that cannot derive
/// epsilon (discarding the seed).
pub fn first_of_sequence(
    symbols: &[String],
    first: &IndexMap<String, BTreeSet<Lookahead>>,
) -> BTreeSet<Lookahead> {
    let mut out = BTreeSet::from([Lookahead::Epsilon]);
    for symbol in symbols {
        let set = &first[symbol.as_str()];
        out.extend(set.iter().cloned());
        if !set.contains(&Lookahead::Epsilon) {
            out.remove(&Lookahead::Epsilon);
            break;
        }
    }
    out
}

/// FIRST for every terminal and nonterminal of the grammar.
pub fn first_sets(
    terminals: &IndexSet<String>,
    nonterminals: &IndexSet<String>,
    rules: &[(String, Vec<String>)],
) -> IndexMap<String, BTreeSet<Lookahead>> {
    let mut first: IndexMap<String, BTreeSet<Lookahead>> = IndexMap::new();
    for terminal in terminals {
        first.insert(
            terminal.clone(),
            BTreeSet::from([Lookahead::terminal(terminal)]),
        );
    }
    for nonterminal in nonterminals {
        first.insert(nonterminal.clone(), BTreeSet::new());
    }

    loop {
        let mut changed = false;
        for (nonterminal, rule) in rules {
            let derived = first_of_sequence(rule, &first);
            let known = &mut first[nonterminal.as_str()];
            for item in derived {
                changed |= known.insert(item);
            }
        }
        if !changed {
            return first;
        }
    }
}
