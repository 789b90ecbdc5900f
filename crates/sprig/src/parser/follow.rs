//! FOLLOW-set computation.
//!
//! Least fixed point over the rules: whatever can start the tail after a
//! nonterminal occurrence follows it, and when the tail can vanish the
//! producing nonterminal's own FOLLOW flows through.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use super::first::first_of_sequence;
use super::symbols::Lookahead;

/// FOLLOW for every nonterminal of the grammar.
pub fn follow_sets(
    nonterminals: &IndexSet<String>,
    start: &str,
    first: &IndexMap<String, BTreeSet<Lookahead>>,
    rules: &[(String, Vec<String>)],
) -> IndexMap<String, BTreeSet<Lookahead>> {
    let mut follow: IndexMap<String, BTreeSet<Lookahead>> = nonterminals
        .iter()
        .map(|n| (n.clone(), BTreeSet::new()))
        .collect();
    follow.insert(start.to_owned(), BTreeSet::from([Lookahead::EndOfInput]));

    loop {
        let mut changed = false;
        for (producer, rule) in rules {
            for (i, symbol) in rule.iter().enumerate() {
                if !follow.contains_key(symbol.as_str()) {
                    continue;
                }

                let mut incoming = first_of_sequence(&rule[i + 1..], first);
                if incoming.remove(&Lookahead::Epsilon) {
                    incoming.extend(follow[producer.as_str()].iter().cloned());
                }

                let known = &mut follow[symbol.as_str()];
                for item in incoming {
                    changed |= known.insert(item);
                }
            }
        }
        if !changed {
            return follow;
        }
    }
}
