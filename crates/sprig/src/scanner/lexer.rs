//! Surface tokenizer for regular-expression patterns.
//!
//! Turns the written form of a pattern into a stream of [`Symbol`]s: bare
//! operator characters become operator tags, escapes collapse to the literal
//! character they denote, and everything else passes through as a literal.

use logos::{Lexer, Logos};

use super::alphabet;
use super::error::ScannerError;
use super::symbol::{Op, Symbol};

/// Failure reasons surfaced while tokenizing a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    InvalidEscape(char),
    TrailingEscape,
    Unrecognized(char),
    #[default]
    Unknown,
}

impl From<LexError> for ScannerError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::InvalidEscape(c) => ScannerError::InvalidEscape(c),
            LexError::TrailingEscape => ScannerError::EmptyEscape,
            LexError::Unrecognized(c) => ScannerError::UnrecognizedCharacter(c),
            // The catch-all rule matches every character, so Logos never
            // reports a bare no-match error.
            LexError::Unknown => ScannerError::MalformedExpression,
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexError)]
enum RawToken {
    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("?")]
    Question,

    #[token(".")]
    Concat,

    #[token("|")]
    Union,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[regex(r"\\[\s\S]", unescape)]
    Escaped(char),

    #[regex(r"[\s\S]", literal, priority = 1)]
    Literal(char),
}

fn unescape(lex: &mut Lexer<RawToken>) -> Result<char, LexError> {
    // The slice is exactly `\X`.
    let escaped = lex.slice().chars().nth(1).expect("escape rule matched two characters");
    match escaped {
        '*' | '+' | '?' | '.' | '|' | '(' | ')' | '[' | ']' | '\\' => Ok(escaped),
        's' => Ok(' '),
        't' => Ok('\t'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0c'),
        'v' => Ok('\x0b'),
        other => Err(LexError::InvalidEscape(other)),
    }
}

fn literal(lex: &mut Lexer<RawToken>) -> Result<char, LexError> {
    let c = lex.slice().chars().next().expect("literal rule matched one character");
    if c == '\\' {
        // A backslash only reaches the one-character rule at end of input;
        // anywhere else the two-character escape rule wins.
        return Err(LexError::TrailingEscape);
    }
    if !alphabet::accepts(c) {
        return Err(LexError::Unrecognized(c));
    }
    Ok(c)
}

/// Tokenize a surface pattern into literal characters and operator tags.
pub fn lex(pattern: &str) -> Result<Vec<Symbol>, ScannerError> {
    let mut out = Vec::new();
    for token in RawToken::lexer(pattern) {
        let symbol = match token? {
            RawToken::Star => Symbol::Op(Op::Star),
            RawToken::Plus => Symbol::Op(Op::Plus),
            RawToken::Question => Symbol::Op(Op::Question),
            RawToken::Concat => Symbol::Op(Op::Concat),
            RawToken::Union => Symbol::Op(Op::Union),
            RawToken::LParen => Symbol::Op(Op::LParen),
            RawToken::RParen => Symbol::Op(Op::RParen),
            RawToken::LBracket => Symbol::Op(Op::LBracket),
            RawToken::RBracket => Symbol::Op(Op::RBracket),
            RawToken::Escaped(c) | RawToken::Literal(c) => Symbol::Char(c),
        };
        out.push(symbol);
    }
    Ok(out)
}
