//! JSON specification documents.
//!
//! The on-disk form consumed by the command-line driver. A scanner document
//! spells each pattern as a sequence of single-character strings, where a
//! two-character `\X` element denotes the bare character `X` (read as an
//! operator, or positionally inside brackets) rather than the literal. The
//! loader rebuilds the written pattern syntax before handing the map to the
//! compiler, escaping literal elements that happen to be operator
//! characters.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::parser::{ParseTable, ParserError};
use crate::scanner::{ScannerDfa, ScannerError};

/// A scanner specification document.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerSpec {
    pub name: String,
    pub expressions: IndexMap<String, Vec<String>>,
}

impl ScannerSpec {
    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Rebuild the surface patterns and compile them.
    pub fn compile(&self) -> Result<ScannerDfa, ScannerError> {
        let expressions: IndexMap<String, String> = self
            .expressions
            .iter()
            .map(|(token, elements)| (token.clone(), render_pattern(elements)))
            .collect();
        ScannerDfa::compile(self.name.clone(), expressions)
    }
}

/// A parser specification document.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserSpec {
    pub name: String,
    pub expressions: IndexMap<String, Vec<Vec<String>>>,
    pub start: String,
}

impl ParserSpec {
    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Compile the grammar.
    pub fn compile(&self) -> Result<ParseTable, ParserError> {
        ParseTable::compile(self.name.clone(), self.expressions.clone(), self.start.clone())
    }
}

/// Rebuild an element sequence as one surface pattern.
///
/// `\X` elements pass `X` through bare; literal elements are escaped
/// wherever the surface syntax would read them as structure.
fn render_pattern(elements: &[String]) -> String {
    let mut pattern = String::new();
    for element in elements {
        match element.as_str() {
            r"\*" => pattern.push('*'),
            r"\+" => pattern.push('+'),
            r"\." => pattern.push('.'),
            r"\|" => pattern.push('|'),
            r"\?" => pattern.push('?'),
            r"\(" => pattern.push('('),
            r"\)" => pattern.push(')'),
            r"\[" => pattern.push('['),
            r"\]" => pattern.push(']'),
            r"\-" => pattern.push('-'),
            r"\^" => pattern.push('^'),
            literal => {
                for c in literal.chars() {
                    if matches!(c, '*' | '+' | '.' | '|' | '?' | '(' | ')' | '[' | ']' | '\\') {
                        pattern.push('\\');
                    }
                    pattern.push(c);
                }
            }
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn render_passes_operators_through_bare() {
        let elements: Vec<String> = [r"\(", "a", r"\|", "b", r"\)", r"\*"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(render_pattern(&elements), "(a|b)*");
    }

    #[test]
    fn render_escapes_literal_operator_characters() {
        let elements: Vec<String> = ["*", "+", "a", "\\"].iter().map(|s| s.to_string()).collect();
        assert_eq!(render_pattern(&elements), r"\*\+a\\");
    }

    #[test]
    fn scanner_spec_compiles_through_translation() {
        let text = indoc! {r#"
            {
                "name": "calc",
                "expressions": {
                    "number": ["\\[", "0", "\\-", "9", "\\]", "\\+"],
                    "plus": ["+"]
                }
            }
        "#};
        let spec = ScannerSpec::from_json(text).unwrap();
        assert_eq!(spec.name, "calc");

        let dfa = spec.compile().unwrap();
        assert_eq!(dfa.expressions()["number"], "[0-9]+");
        assert_eq!(dfa.expressions()["plus"], r"\+");
        assert_eq!(dfa.matches("42"), Some("number"));
        assert_eq!(dfa.matches("+"), Some("plus"));
    }

    #[test]
    fn parser_spec_compiles() {
        let text = indoc! {r#"
            {
                "name": "list",
                "expressions": {
                    "<list>": [["item", "<list>"], []]
                },
                "start": "<list>"
            }
        "#};
        let spec = ParserSpec::from_json(text).unwrap();
        let table = spec.compile().unwrap();
        assert_eq!(table.name(), "list");
        assert!(table.is_ll1());
        assert_eq!(table.rules().len(), 2);
    }

    #[test]
    fn malformed_documents_fail_to_parse() {
        assert!(ScannerSpec::from_json("{}").is_err());
        assert!(ScannerSpec::from_json(r#"{"name": 3, "expressions": {}}"#).is_err());
        assert!(ParserSpec::from_json(r#"{"name": "g", "expressions": {}}"#).is_err());
    }

    #[test]
    fn spec_order_is_preserved() {
        let text = r#"{"name": "s", "expressions": {"b": ["b"], "a": ["a"]}}"#;
        let spec = ScannerSpec::from_json(text).unwrap();
        let tokens: Vec<&String> = spec.expressions.keys().collect();
        assert_eq!(tokens, ["b", "a"]);
    }
}
