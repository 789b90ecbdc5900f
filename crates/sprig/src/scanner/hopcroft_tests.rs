use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use crate::ids::StateId;

use super::hopcroft::minimize;
use super::totalize::TotalDfa;

fn key() -> BTreeSet<StateId> {
    BTreeSet::from([StateId::fresh()])
}

/// Two accept states with identical continuations plus a shared sink.
///
///   0 -a-> 1, 0 -b-> 2, everything else -> 3
fn two_equivalent_accepts() -> TotalDfa {
    TotalDfa {
        states: vec![key(), key(), key(), key()],
        alphabet: IndexSet::from(['a', 'b']),
        table: vec![
            vec![1, 3, 3, 3], // on 'a'
            vec![2, 3, 3, 3], // on 'b'
        ],
        start: 0,
        finals: BTreeSet::from([1, 2]),
        token_finals: IndexMap::from([
            ("one".to_owned(), BTreeSet::from([1])),
            ("two".to_owned(), BTreeSet::from([2])),
            ("_sink".to_owned(), BTreeSet::from([3])),
        ]),
    }
}

#[test]
fn equivalent_accepts_merge() {
    let quotient = minimize(&two_equivalent_accepts());
    assert_eq!(quotient.partitions.len(), 3);
    assert_eq!(quotient.finals.len(), 1);
    // both token entries point at the single merged accept
    assert_eq!(quotient.token_finals["one"], quotient.token_finals["two"]);
}

#[test]
fn sink_entry_survives_minimization() {
    let quotient = minimize(&two_equivalent_accepts());
    let sink_parts = &quotient.token_finals["_sink"];
    assert_eq!(sink_parts.len(), 1);
    // the sink partition is not accepting
    for part in sink_parts {
        assert!(!quotient.finals.contains(part));
    }
}

#[test]
fn quotient_transitions_respect_representatives() {
    let quotient = minimize(&two_equivalent_accepts());
    let accept = *quotient.token_finals["one"].iter().next().unwrap();
    let sink = *quotient.token_finals["_sink"].iter().next().unwrap();

    // start steps into the merged accept on both characters
    assert_eq!(quotient.table[0][quotient.start], accept);
    assert_eq!(quotient.table[1][quotient.start], accept);
    // the accept and the sink both fall into the sink
    assert_eq!(quotient.table[0][accept], sink);
    assert_eq!(quotient.table[1][sink], sink);
}

/// Distinguishable accepts must not merge.
///
///   0 -a-> 1 (accept), 1 -a-> 2 (accept), 2 -a-> 3 (sink)
#[test]
fn distinguishable_accepts_stay_apart() {
    let dfa = TotalDfa {
        states: vec![key(), key(), key(), key()],
        alphabet: IndexSet::from(['a']),
        table: vec![vec![1, 2, 3, 3]],
        start: 0,
        finals: BTreeSet::from([1, 2]),
        token_finals: IndexMap::from([
            ("tok".to_owned(), BTreeSet::from([1, 2])),
            ("_sink".to_owned(), BTreeSet::from([3])),
        ]),
    };
    let quotient = minimize(&dfa);
    // 1 accepts a second 'a', 2 does not: no merge anywhere
    assert_eq!(quotient.partitions.len(), 4);
    assert_eq!(quotient.token_finals["tok"].len(), 2);
}

/// A one-state machine refuses to split.
#[test]
fn single_accepting_state_is_fixed_point() {
    let dfa = TotalDfa {
        states: vec![key()],
        alphabet: IndexSet::from(['a']),
        table: vec![vec![0]],
        start: 0,
        finals: BTreeSet::from([0]),
        token_finals: IndexMap::from([("tok".to_owned(), BTreeSet::from([0]))]),
    };
    let quotient = minimize(&dfa);
    assert_eq!(quotient.partitions.len(), 1);
    assert_eq!(quotient.start, 0);
    assert_eq!(quotient.table, vec![vec![0]]);
}
