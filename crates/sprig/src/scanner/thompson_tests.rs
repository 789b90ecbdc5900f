use super::symbol::{Op, Symbol};
use super::thompson::build;
use super::ScannerError;

fn ch(c: char) -> Symbol {
    Symbol::Char(c)
}

fn op(o: Op) -> Symbol {
    Symbol::Op(o)
}

#[test]
fn literal_fragment_shape() {
    let frag = build("tok", &[ch('a')]).unwrap();
    assert_eq!(frag.states.len(), 2);
    assert_eq!(frag.alphabet.len(), 1);
    assert_eq!(frag.transitions, vec![(frag.start, 'a', frag.finish)]);
    assert!(frag.epsilon.is_empty());
    assert_eq!(frag.token, "tok");
}

#[test]
fn concat_wires_finish_to_start() {
    // ab.  ->  a's finish -e-> b's start
    let frag = build("tok", &[ch('a'), ch('b'), op(Op::Concat)]).unwrap();
    assert_eq!(frag.states.len(), 4);
    assert_eq!(frag.transitions.len(), 2);
    // one epsilon edge in the whole fragment
    let edges: usize = frag.epsilon.values().map(|s| s.len()).sum();
    assert_eq!(edges, 1);
    // start/finish come from the operand fragments
    let (a_start, _, _) = frag.transitions[0];
    let (_, _, b_finish) = frag.transitions[1];
    assert_eq!(frag.start, a_start);
    assert_eq!(frag.finish, b_finish);
}

#[test]
fn union_adds_fresh_endpoints() {
    let frag = build("tok", &[ch('a'), ch('b'), op(Op::Union)]).unwrap();
    assert_eq!(frag.states.len(), 6);
    let edges: usize = frag.epsilon.values().map(|s| s.len()).sum();
    assert_eq!(edges, 4);
    // the fresh start branches to both operand starts
    assert_eq!(frag.epsilon[&frag.start].len(), 2);
}

#[test]
fn star_allows_skip_and_repeat() {
    let frag = build("tok", &[ch('a'), op(Op::Star)]).unwrap();
    let edges: usize = frag.epsilon.values().map(|s| s.len()).sum();
    assert_eq!(edges, 4);
    // skip edge start -e-> finish
    assert!(frag.epsilon[&frag.start].contains(&frag.finish));
}

#[test]
fn plus_has_no_skip_edge() {
    let frag = build("tok", &[ch('a'), op(Op::Plus)]).unwrap();
    let edges: usize = frag.epsilon.values().map(|s| s.len()).sum();
    assert_eq!(edges, 3);
    assert!(!frag.epsilon[&frag.start].contains(&frag.finish));
}

#[test]
fn question_skips_but_never_repeats() {
    let frag = build("tok", &[ch('a'), op(Op::Question)]).unwrap();
    let edges: usize = frag.epsilon.values().map(|s| s.len()).sum();
    assert_eq!(edges, 3);
    assert!(frag.epsilon[&frag.start].contains(&frag.finish));
}

#[test]
fn operator_without_operands_is_malformed() {
    assert_eq!(
        build("tok", &[op(Op::Star)]),
        Err(ScannerError::MalformedExpression)
    );
    assert_eq!(
        build("tok", &[ch('a'), op(Op::Concat)]),
        Err(ScannerError::MalformedExpression)
    );
}

#[test]
fn leftover_operands_are_malformed() {
    // two literals with no joining operator
    assert_eq!(
        build("tok", &[ch('a'), ch('b')]),
        Err(ScannerError::MalformedExpression)
    );
    // empty expression
    assert_eq!(build("tok", &[]), Err(ScannerError::MalformedExpression));
}
