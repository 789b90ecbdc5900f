//! Grammar ingestion.
//!
//! Validates the production map, flattens it into an indexed rule list, and
//! partitions the symbol space: nonterminals are the production keys,
//! terminals are every right-hand-side symbol that is not one.

use indexmap::{IndexMap, IndexSet};

use super::error::ParserError;

/// A validated, flattened grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// `(nonterminal, rule)` pairs; the index is the rule id used in the
    /// parse table.
    pub rules: Vec<(String, Vec<String>)>,
    pub terminals: IndexSet<String>,
    pub nonterminals: IndexSet<String>,
}

/// Validate and flatten `productions`.
pub fn ingest(
    productions: &IndexMap<String, Vec<Vec<String>>>,
    start: &str,
) -> Result<Grammar, ParserError> {
    if productions.is_empty() {
        return Err(ParserError::InvalidSpecification);
    }
    if !productions.contains_key(start) {
        return Err(ParserError::StartNotInProductions(start.to_owned()));
    }

    let nonterminals: IndexSet<String> = productions.keys().cloned().collect();
    let mut terminals = IndexSet::new();
    let mut rules = Vec::new();

    for (nonterminal, alternatives) in productions {
        if nonterminal.is_empty() {
            return Err(ParserError::EmptyNonterminal);
        }
        if alternatives.is_empty() {
            return Err(ParserError::InvalidSpecification);
        }
        for rule in alternatives {
            for symbol in rule {
                if symbol.is_empty() {
                    return Err(ParserError::EmptyRuleSymbol(nonterminal.clone()));
                }
                if !nonterminals.contains(symbol) {
                    terminals.insert(symbol.clone());
                }
            }
            rules.push((nonterminal.clone(), rule.clone()));
        }
    }

    Ok(Grammar {
        rules,
        terminals,
        nonterminals,
    })
}
