//! Grammar lookahead symbols.

use std::fmt;

/// A symbol appearing in FIRST/FOLLOW sets and parse-table columns.
///
/// The two sentinels are variants of their own, so no user terminal string
/// can collide with them. `Epsilon` shows up in FIRST sets only;
/// `EndOfInput` in FOLLOW sets and as the last table column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookahead {
    /// A grammar terminal.
    Terminal(String),
    /// The end-of-input marker.
    EndOfInput,
    /// The empty derivation.
    Epsilon,
}

impl Lookahead {
    /// Convenience constructor for a terminal.
    pub fn terminal(s: impl Into<String>) -> Self {
        Lookahead::Terminal(s.into())
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Terminal(s) => write!(f, "{s}"),
            Lookahead::EndOfInput => write!(f, "$"),
            Lookahead::Epsilon => write!(f, "ε"),
        }
    }
}
