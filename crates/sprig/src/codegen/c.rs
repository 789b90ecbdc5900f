//! C backend.
//!
//! Emits a single `.c` file: the scanner's dense transition table with a
//! `*_next_token` driver, and the parse table with a `*_parse` driver.
//! Table encoding only. Driver bodies are fixed templates with the `@p@`
//! (identifier prefix) and `@u@` (uppercase prefix) markers substituted.

use indexmap::IndexMap;

use crate::ids::StateId;
use crate::parser::{Lookahead, ParseTable};
use crate::scanner::{ScannerDfa, SINK_TYPE};

use super::{Backend, CodegenError, Encoding, Job, MatchPolicy};

pub struct CBackend;

impl Backend for CBackend {
    fn language(&self) -> &'static str {
        "c"
    }

    fn translate(&self, job: &Job<'_>) -> Result<IndexMap<String, String>, CodegenError> {
        if job.options.encoding == Encoding::Direct {
            return Err(CodegenError::Unsupported {
                backend: self.language(),
                encoding: job.options.encoding,
            });
        }

        let mut out = String::new();
        out.push_str("/*\n * Generated by sprig. Do not edit.\n");
        if let Some(scanner) = job.scanner {
            out.push_str(&format!(" * scanner: {}\n", scanner.name()));
        }
        if let Some(parser) = job.parser {
            out.push_str(&format!(" * parser: {}\n", parser.name()));
        }
        out.push_str(" */\n#include <stddef.h>\n#include <string.h>\n");

        if let Some(scanner) = job.scanner {
            emit_scanner(&mut out, scanner, job.options.match_policy);
        }
        if let Some(parser) = job.parser {
            emit_parser(&mut out, parser);
        }

        let filename = format!("{}.c", job.options.base);
        Ok(IndexMap::from([(filename, out)]))
    }
}

/// Lowercase C identifier derived from an artifact name.
fn ident(name: &str) -> String {
    let mut out = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push('_');
        }
    }
    if out.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// A character as it appears inside a C character literal.
fn c_char(c: char) -> String {
    match c {
        '\t' => r"\t".to_owned(),
        '\n' => r"\n".to_owned(),
        '\r' => r"\r".to_owned(),
        '\x0b' => r"\v".to_owned(),
        '\x0c' => r"\f".to_owned(),
        '\'' => r"\'".to_owned(),
        '\\' => r"\\".to_owned(),
        ' '..='~' => c.to_string(),
        other => format!("\\x{:02x}", other as u32),
    }
}

/// A string as it appears inside a C string literal.
fn c_str(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(c),
            other => out.push_str(&format!("\\x{:02x}", other as u32)),
        }
    }
    out
}

fn token_of<'a>(scanner: &'a ScannerDfa, state: &StateId) -> Option<&'a str> {
    scanner
        .types()
        .iter()
        .find(|(token, finals)| *token != SINK_TYPE && finals.contains(state))
        .map(|(token, _)| token.as_str())
}

fn fill(template: &str, p: &str, upper: &str) -> String {
    template.replace("@p@", p).replace("@u@", upper)
}

const SYMBOL_INDEX_FN: &str = "
static int @p@_symbol_index(int c)
{
    int v;
    for (v = 0; v < @u@_NUM_SYMBOLS; v++) {
        if (@p@_alphabet[v] == (char)c) {
            return v;
        }
    }
    return -1;
}
";

const NEXT_TOKEN_HEAD: &str = "
/*
 * Scan one token from the front of `input`. Returns the token name and
 * stores the lexeme length through `length`, or returns NULL when no
 * prefix is accepted.
 */
const char *@p@_next_token(const char *input, size_t *length)
{
    int state = @p@_start;
    size_t consumed = 0;
    size_t best_length = 0;
    const char *best_token = NULL;

    while (input[consumed] != '\\0') {
        int v = @p@_symbol_index((unsigned char)input[consumed]);
        if (v < 0) {
            break;
        }
        state = @p@_delta[v][state];
        consumed++;
        if (@p@_accepting[state]) {
            best_token = @p@_token_of[state];
            best_length = consumed;
";

const NEXT_TOKEN_TAIL: &str = "        }
    }

    *length = best_length;
    return best_token;
}
";

fn emit_scanner(out: &mut String, scanner: &ScannerDfa, policy: MatchPolicy) {
    let p = ident(scanner.name());
    let upper = p.to_ascii_uppercase();
    let (state_index, _, table) = scanner.transitions();
    let states: Vec<&StateId> = scanner.states().iter().collect();

    out.push_str(&format!(
        "\n/* scanner {}: minimal DFA over {} states and {} characters */\n",
        scanner.name(),
        states.len(),
        scanner.alphabet().len()
    ));
    out.push_str(&format!("#define {upper}_NUM_STATES {}\n", states.len()));
    out.push_str(&format!(
        "#define {upper}_NUM_SYMBOLS {}\n\n",
        scanner.alphabet().len()
    ));

    let alphabet: Vec<String> = scanner
        .alphabet()
        .iter()
        .map(|&c| format!("'{}'", c_char(c)))
        .collect();
    out.push_str(&format!(
        "static const char {p}_alphabet[{upper}_NUM_SYMBOLS] = {{ {} }};\n",
        alphabet.join(", ")
    ));
    out.push_str(&format!(
        "static const int {p}_start = {};\n",
        state_index[&scanner.start()]
    ));

    let accepting: Vec<&str> = states
        .iter()
        .map(|s| if scanner.accepting().contains(*s) { "1" } else { "0" })
        .collect();
    out.push_str(&format!(
        "static const int {p}_accepting[{upper}_NUM_STATES] = {{ {} }};\n",
        accepting.join(", ")
    ));

    let names: Vec<String> = states
        .iter()
        .map(|s| match token_of(scanner, s) {
            Some(token) => format!("\"{}\"", c_str(token)),
            None => "NULL".to_owned(),
        })
        .collect();
    out.push_str(&format!(
        "static const char *{p}_token_of[{upper}_NUM_STATES] = {{ {} }};\n",
        names.join(", ")
    ));

    out.push_str(&format!(
        "/* {p}_delta[symbol][state] is the successor state */\n"
    ));
    out.push_str(&format!(
        "static const int {p}_delta[{upper}_NUM_SYMBOLS][{upper}_NUM_STATES] = {{\n"
    ));
    for row in table {
        let cells: Vec<String> = row.iter().map(|s| state_index[s].to_string()).collect();
        out.push_str(&format!("    {{ {} }},\n", cells.join(", ")));
    }
    out.push_str("};\n");

    out.push_str(&fill(SYMBOL_INDEX_FN, &p, &upper));
    out.push_str(&fill(NEXT_TOKEN_HEAD, &p, &upper));
    if policy == MatchPolicy::Shortest {
        out.push_str("            break;\n");
    }
    out.push_str(NEXT_TOKEN_TAIL);
}

const LOOKUP_FNS: &str = "
static int @p@_nonterminal_index(const char *symbol)
{
    int i;
    for (i = 0; i < @u@_NUM_NONTERMINALS; i++) {
        if (strcmp(@p@_nonterminals[i], symbol) == 0) {
            return i;
        }
    }
    return -1;
}

static int @p@_lookahead_index(const char *symbol)
{
    int i;
    for (i = 0; i < @u@_NUM_LOOKAHEADS; i++) {
        if (strcmp(@p@_lookaheads[i], symbol) == 0) {
            return i;
        }
    }
    return -1;
}
";

const PARSE_FN: &str = "
/*
 * Check `tokens` (a NULL-terminated array of terminal names) against the
 * grammar. Returns 1 on acceptance, 0 on rejection, -1 on overflow.
 */
int @p@_parse(const char **tokens)
{
    const char *stack[@u@_PARSE_STACK];
    size_t top = 0;
    size_t position = 0;
    const char *lookahead = tokens[position] ? tokens[position] : \"$\";

    stack[top++] = \"$\";
    stack[top++] = @p@_start_symbol;

    while (top > 0) {
        const char *symbol = stack[--top];
        int row = @p@_nonterminal_index(symbol);
        int col, rule, i;

        if (row < 0) {
            if (strcmp(symbol, lookahead) != 0) {
                return 0;
            }
            if (strcmp(symbol, \"$\") == 0) {
                return 1;
            }
            position++;
            lookahead = tokens[position] ? tokens[position] : \"$\";
            continue;
        }

        col = @p@_lookahead_index(lookahead);
        if (col < 0) {
            return 0;
        }
        rule = @p@_table[row][col];
        if (rule < 0) {
            return 0;
        }
        if (top + (size_t)(@p@_rule_first[rule + 1] - @p@_rule_first[rule])
            > @u@_PARSE_STACK) {
            return -1;
        }
        for (i = @p@_rule_first[rule + 1] - 1; i >= @p@_rule_first[rule]; i--) {
            stack[top++] = @p@_rule_rhs[i];
        }
    }
    return 0;
}
";

fn emit_parser(out: &mut String, parser: &ParseTable) {
    let p = ident(parser.name());
    let upper = p.to_ascii_uppercase();
    let (cells, rows, cols) = parser.table();

    out.push_str(&format!(
        "\n/* parser {}: LL(1) table over {} nonterminals and {} lookaheads */\n",
        parser.name(),
        rows.len(),
        cols.len()
    ));
    let conflicts = parser.conflicts().len();
    if conflicts > 0 {
        out.push_str(&format!(
            "/* note: {conflicts} conflicted cells; the lowest rule id wins in each */\n"
        ));
    }
    out.push_str(&format!("#define {upper}_NUM_NONTERMINALS {}\n", rows.len()));
    out.push_str(&format!("#define {upper}_NUM_LOOKAHEADS {}\n", cols.len()));
    out.push_str(&format!("#define {upper}_NUM_RULES {}\n", parser.rules().len()));
    out.push_str(&format!("#define {upper}_PARSE_STACK 512\n\n"));

    let nonterminals: Vec<String> = rows.keys().map(|n| format!("\"{}\"", c_str(n))).collect();
    out.push_str(&format!(
        "static const char *{p}_nonterminals[{upper}_NUM_NONTERMINALS] = {{ {} }};\n",
        nonterminals.join(", ")
    ));

    let lookaheads: Vec<String> = cols
        .keys()
        .map(|t| match t {
            Lookahead::Terminal(s) => format!("\"{}\"", c_str(s)),
            // the end-of-input column renders as "$"
            _ => "\"$\"".to_owned(),
        })
        .collect();
    out.push_str(&format!(
        "static const char *{p}_lookaheads[{upper}_NUM_LOOKAHEADS] = {{ {} }};\n",
        lookaheads.join(", ")
    ));
    out.push_str(&format!(
        "static const char *{p}_start_symbol = \"{}\";\n",
        c_str(parser.start())
    ));

    out.push_str(&format!(
        "/* {p}_table[nonterminal][lookahead] is a rule id, or -1 */\n"
    ));
    out.push_str(&format!(
        "static const int {p}_table[{upper}_NUM_NONTERMINALS][{upper}_NUM_LOOKAHEADS] = {{\n"
    ));
    for row in cells {
        let rendered: Vec<String> = row
            .iter()
            .map(|cell| match cell.iter().next() {
                Some(rule) => rule.to_string(),
                None => "-1".to_owned(),
            })
            .collect();
        out.push_str(&format!("    {{ {} }},\n", rendered.join(", ")));
    }
    out.push_str("};\n");

    let lhs: Vec<String> = parser
        .rules()
        .iter()
        .map(|(nonterminal, _)| rows[nonterminal.as_str()].to_string())
        .collect();
    out.push_str(&format!(
        "static const int {p}_rule_lhs[{upper}_NUM_RULES] = {{ {} }};\n",
        lhs.join(", ")
    ));

    let mut offsets = vec![0usize];
    let mut rhs: Vec<String> = Vec::new();
    for (_, sequence) in parser.rules() {
        for symbol in sequence {
            rhs.push(format!("\"{}\"", c_str(symbol)));
        }
        offsets.push(rhs.len());
    }
    if rhs.is_empty() {
        // C forbids zero-length arrays
        rhs.push("NULL".to_owned());
    }
    let offsets: Vec<String> = offsets.iter().map(usize::to_string).collect();
    out.push_str(&format!(
        "static const int {p}_rule_first[{upper}_NUM_RULES + 1] = {{ {} }};\n",
        offsets.join(", ")
    ));
    out.push_str(&format!(
        "static const char *{p}_rule_rhs[] = {{ {} }};\n",
        rhs.join(", ")
    ));

    out.push_str(&fill(LOOKUP_FNS, &p, &upper));
    out.push_str(&fill(PARSE_FN, &p, &upper));
}
