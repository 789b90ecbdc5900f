//! Python backend.
//!
//! Emits a single `.py` file mirroring the C backend's content: scanner
//! tables with a `next_token` driver and parser tables with a `parse`
//! driver. Table encoding only.

use indexmap::IndexMap;

use crate::ids::StateId;
use crate::parser::{Lookahead, ParseTable};
use crate::scanner::{ScannerDfa, SINK_TYPE};

use super::{Backend, CodegenError, Encoding, Job, MatchPolicy};

pub struct PythonBackend;

impl Backend for PythonBackend {
    fn language(&self) -> &'static str {
        "python"
    }

    fn translate(&self, job: &Job<'_>) -> Result<IndexMap<String, String>, CodegenError> {
        if job.options.encoding == Encoding::Direct {
            return Err(CodegenError::Unsupported {
                backend: self.language(),
                encoding: job.options.encoding,
            });
        }

        let mut out = String::new();
        out.push_str("\"\"\"Generated by sprig. Do not edit.\n");
        if let Some(scanner) = job.scanner {
            out.push_str(&format!("\nscanner: {}", scanner.name()));
        }
        if let Some(parser) = job.parser {
            out.push_str(&format!("\nparser: {}", parser.name()));
        }
        out.push_str("\n\"\"\"\n");

        if let Some(scanner) = job.scanner {
            emit_scanner(&mut out, scanner, job.options.match_policy);
        }
        if let Some(parser) = job.parser {
            emit_parser(&mut out, parser);
        }

        let filename = format!("{}.py", job.options.base);
        Ok(IndexMap::from([(filename, out)]))
    }
}

/// A string as it appears inside a double-quoted Python literal.
fn py_str(s: &str) -> String {
    let mut out = String::from('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(c),
            other => out.push_str(&format!("\\x{:02x}", other as u32)),
        }
    }
    out.push('"');
    out
}

fn py_char(c: char) -> String {
    py_str(&c.to_string())
}

fn token_of<'a>(scanner: &'a ScannerDfa, state: &StateId) -> Option<&'a str> {
    scanner
        .types()
        .iter()
        .find(|(token, finals)| *token != SINK_TYPE && finals.contains(state))
        .map(|(token, _)| token.as_str())
}

const NEXT_TOKEN_HEAD: &str = r#"

def next_token(text):
    """Scan one token from the front of `text`.

    Returns `(name, length)`, or `(None, 0)` when no prefix is accepted.
    """
    state = START
    consumed = 0
    best = (None, 0)
    for ch in text:
        index = SYMBOL_INDEX.get(ch)
        if index is None:
            break
        state = DELTA[index][state]
        consumed += 1
        if ACCEPTING[state]:
            best = (TOKEN_OF[state], consumed)
"#;

const NEXT_TOKEN_TAIL: &str = "    return best\n";

fn emit_scanner(out: &mut String, scanner: &ScannerDfa, policy: MatchPolicy) {
    let (state_index, _, table) = scanner.transitions();
    let states: Vec<&StateId> = scanner.states().iter().collect();

    out.push_str(&format!("\nSCANNER_NAME = {}\n", py_str(scanner.name())));
    out.push_str(&format!("START = {}\n", state_index[&scanner.start()]));

    let alphabet: Vec<String> = scanner.alphabet().iter().map(|&c| py_char(c)).collect();
    out.push_str(&format!("ALPHABET = [{}]\n", alphabet.join(", ")));
    out.push_str("SYMBOL_INDEX = {ch: index for index, ch in enumerate(ALPHABET)}\n");

    let accepting: Vec<&str> = states
        .iter()
        .map(|s| if scanner.accepting().contains(*s) { "True" } else { "False" })
        .collect();
    out.push_str(&format!("ACCEPTING = [{}]\n", accepting.join(", ")));

    let names: Vec<String> = states
        .iter()
        .map(|s| match token_of(scanner, s) {
            Some(token) => py_str(token),
            None => "None".to_owned(),
        })
        .collect();
    out.push_str(&format!("TOKEN_OF = [{}]\n", names.join(", ")));

    out.push_str("# DELTA[symbol][state] is the successor state\nDELTA = [\n");
    for row in table {
        let cells: Vec<String> = row.iter().map(|s| state_index[s].to_string()).collect();
        out.push_str(&format!("    [{}],\n", cells.join(", ")));
    }
    out.push_str("]\n");

    out.push_str(NEXT_TOKEN_HEAD);
    if policy == MatchPolicy::Shortest {
        out.push_str("            break\n");
    }
    out.push_str(NEXT_TOKEN_TAIL);
}

const PARSE_FN: &str = r#"

def parse(tokens):
    """Check `tokens` (an iterable of terminal names) against the grammar.

    Returns True when the token stream derives from the start symbol.
    """
    pending = list(tokens)
    pending.append(END_OF_INPUT)
    position = 0
    stack = [END_OF_INPUT, START_SYMBOL]
    while stack:
        symbol = stack.pop()
        if symbol not in NONTERMINAL_SET:
            if symbol != pending[position]:
                return False
            if symbol == END_OF_INPUT:
                return True
            position += 1
            continue
        rule = TABLE.get((symbol, pending[position]))
        if rule is None:
            return False
        stack.extend(reversed(RULES[rule][1]))
    return False
"#;

fn emit_parser(out: &mut String, parser: &ParseTable) {
    let (cells, rows, cols) = parser.table();

    out.push_str(&format!("\nPARSER_NAME = {}\n", py_str(parser.name())));
    out.push_str(&format!("START_SYMBOL = {}\n", py_str(parser.start())));
    out.push_str("END_OF_INPUT = \"$\"\n");

    let nonterminals: Vec<String> = rows.keys().map(|n| py_str(n)).collect();
    out.push_str(&format!("NONTERMINALS = [{}]\n", nonterminals.join(", ")));
    out.push_str("NONTERMINAL_SET = frozenset(NONTERMINALS)\n");

    let lookaheads: Vec<String> = cols
        .keys()
        .map(|t| match t {
            Lookahead::Terminal(s) => py_str(s),
            _ => "\"$\"".to_owned(),
        })
        .collect();
    out.push_str(&format!("LOOKAHEADS = [{}]\n", lookaheads.join(", ")));

    out.push_str("RULES = [\n");
    for (nonterminal, sequence) in parser.rules() {
        let symbols: Vec<String> = sequence.iter().map(|s| py_str(s)).collect();
        out.push_str(&format!(
            "    ({}, [{}]),\n",
            py_str(nonterminal),
            symbols.join(", ")
        ));
    }
    out.push_str("]\n");

    let conflicts = parser.conflicts().len();
    if conflicts > 0 {
        out.push_str(&format!(
            "# note: {conflicts} conflicted cells; the lowest rule id wins in each\n"
        ));
    }
    out.push_str("# TABLE[(nonterminal, lookahead)] is a rule id\nTABLE = {\n");
    let lookaheads: Vec<&Lookahead> = cols.keys().collect();
    for (nonterminal, &row) in rows {
        for (col, lookahead) in lookaheads.iter().enumerate() {
            let Some(rule) = cells[row][col].iter().next() else {
                continue;
            };
            let rendered = match lookahead {
                Lookahead::Terminal(s) => py_str(s),
                _ => "\"$\"".to_owned(),
            };
            out.push_str(&format!(
                "    ({}, {}): {},\n",
                py_str(nonterminal),
                rendered,
                rule
            ));
        }
    }
    out.push_str("}\n");

    out.push_str(PARSE_FN);
}
