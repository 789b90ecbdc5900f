//! Infix to postfix conversion.
//!
//! Shunting yard over the expression stream. Binding strength, tightest
//! first: grouping parens, the postfix repetitions `* + ?`
//! (right-associative), concatenation, then union (both left-associative).

use super::error::ScannerError;
use super::symbol::{Op, Symbol};

/// Binding strength and left-associativity for operators on the stack.
fn binding(op: Op) -> (u8, bool) {
    match op {
        Op::LParen | Op::RParen | Op::LBracket | Op::RBracket => (3, false),
        Op::Star | Op::Plus | Op::Question => (2, false),
        Op::Concat => (1, true),
        Op::Union => (0, true),
    }
}

/// Convert an infix expression stream to postfix, dropping all parentheses.
pub fn shunt(expr: &[Symbol]) -> Result<Vec<Symbol>, ScannerError> {
    let mut stack: Vec<Op> = Vec::new();
    let mut out: Vec<Symbol> = Vec::new();

    for &sym in expr {
        match sym {
            Symbol::Op(Op::LParen) => stack.push(Op::LParen),
            Symbol::Op(Op::RParen) => loop {
                match stack.pop() {
                    Some(Op::LParen) => break,
                    Some(op) => out.push(Symbol::Op(op)),
                    None => return Err(ScannerError::UnbalancedParen),
                }
            },
            Symbol::Op(op @ (Op::Star | Op::Plus | Op::Question | Op::Concat | Op::Union)) => {
                let (precedence, left_associative) = binding(op);
                while let Some(&top) = stack.last() {
                    if top == Op::LParen || !left_associative || precedence > binding(top).0 {
                        break;
                    }
                    out.push(Symbol::Op(top));
                    stack.pop();
                }
                stack.push(op);
            }
            // Bracket tags never survive class expansion; literals pass through.
            _ => out.push(sym),
        }
    }

    while let Some(op) = stack.pop() {
        if op == Op::LParen {
            return Err(ScannerError::UnbalancedParen);
        }
        out.push(Symbol::Op(op));
    }

    Ok(out)
}
