//! Character-class and range expansion.
//!
//! Rewrites every `[...]` form into a parenthesized alternation of literal
//! characters, so no bracket tags survive into the rest of the pipeline.
//! Inside a bracket pair operator tags lose their meaning and contribute
//! their surface character; `^` directly after `[` negates against the full
//! accepted alphabet; `a-b` spans the code points between its endpoints in
//! either direction; a trailing `-` is a literal.

use std::collections::BTreeSet;

use super::alphabet;
use super::error::ScannerError;
use super::symbol::{Op, Symbol};

/// Expand all character classes and ranges in `expr`.
///
/// The identity on streams free of bracket tags.
pub fn expand(expr: &[Symbol]) -> Result<Vec<Symbol>, ScannerError> {
    let mut out = Vec::new();
    let mut members: Vec<char> = Vec::new();
    let mut in_class = false;
    let mut negate = false;
    let mut range_start: Option<char> = None;

    for &sym in expr {
        match sym {
            Symbol::Op(Op::LBracket) if !in_class => in_class = true,
            Symbol::Op(Op::RBracket) => {
                if !in_class {
                    return Err(ScannerError::UnmatchedBracket);
                }
                in_class = false;
                if let Some(from) = range_start.take() {
                    members.push(from);
                    members.push('-');
                }
                let mut set: BTreeSet<char> = members.drain(..).collect();
                if negate {
                    negate = false;
                    set = alphabet::chars().filter(|c| !set.contains(c)).collect();
                }
                if !set.is_empty() {
                    out.push(Symbol::Op(Op::LParen));
                    for (i, c) in set.iter().enumerate() {
                        if i > 0 {
                            out.push(Symbol::Op(Op::Union));
                        }
                        out.push(Symbol::Char(*c));
                    }
                    out.push(Symbol::Op(Op::RParen));
                }
            }
            _ if !in_class => out.push(sym),
            Symbol::Char('^') if members.is_empty() && range_start.is_none() && !negate => {
                negate = true;
            }
            Symbol::Char('-') if !members.is_empty() && range_start.is_none() => {
                range_start = members.pop();
            }
            _ => {
                let c = match sym {
                    Symbol::Char(c) => c,
                    Symbol::Op(op) => op.literal(),
                };
                match range_start.take() {
                    Some(from) => {
                        let (lo, hi) = if from <= c { (from, c) } else { (c, from) };
                        members.extend((lo as u32..=hi as u32).filter_map(char::from_u32));
                    }
                    None => members.push(c),
                }
            }
        }
    }

    if in_class {
        return Err(ScannerError::UnmatchedBracket);
    }
    Ok(out)
}
