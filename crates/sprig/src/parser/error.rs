//! Parser-pipeline failure categories.

/// Everything that can go wrong while compiling a BNF grammar.
///
/// All variants are raised during construction; a successfully built
/// [`ParseTable`](super::ParseTable) never fails afterwards. An LL(1)
/// conflict is not an error: the table is still built and the conflicting
/// cells are reported through the artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    /// The grammar name or the start symbol is empty.
    #[error("grammar and start names must be non-empty")]
    InvalidName,

    /// The productions map is empty, or a nonterminal has no rules.
    #[error("productions must be non-empty")]
    InvalidSpecification,

    /// A production key is the empty string.
    #[error("production nonterminal must be non-empty")]
    EmptyNonterminal,

    /// A rule of `{0}` contains an empty symbol.
    #[error("rule symbol in production `{0}` is empty")]
    EmptyRuleSymbol(String),

    /// The start symbol has no production.
    #[error("start symbol `{0}` has no production")]
    StartNotInProductions(String),
}
