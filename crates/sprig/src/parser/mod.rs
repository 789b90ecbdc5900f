//! BNF grammars to LL(1) parse tables.
//!
//! The pipeline, in order:
//! - `ingest` - validate and flatten productions, split terminal space
//! - `first` - fixed-point FIRST sets
//! - `follow` - fixed-point FOLLOW sets
//! - `table` - predict sets to table cells
//!
//! [`ParseTable::compile`] runs the chain and freezes the result. A grammar
//! that is not LL(1) still compiles; the conflicts stay visible in the table.

mod error;
mod first;
mod follow;
mod ingest;
mod symbols;
mod table;


use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

pub use error::ParserError;
pub use symbols::Lookahead;

/// A compiled grammar: rule list, FIRST/FOLLOW sets, and the LL(1) table.
///
/// Frozen at construction. Accessors hand out views into the artifact's own
/// storage; sharing across threads is safe.
#[derive(Debug, Clone)]
pub struct ParseTable {
    name: String,
    start: String,
    terminals: IndexSet<String>,
    nonterminals: IndexSet<String>,
    first: IndexMap<String, BTreeSet<Lookahead>>,
    follow: IndexMap<String, BTreeSet<Lookahead>>,
    rules: Vec<(String, Vec<String>)>,
    cells: Vec<Vec<BTreeSet<usize>>>,
    rows: IndexMap<String, usize>,
    cols: IndexMap<Lookahead, usize>,
}

impl ParseTable {
    /// Compile `productions` into an LL(1) parse table with `start` as the
    /// start symbol.
    pub fn compile(
        name: impl Into<String>,
        productions: IndexMap<String, Vec<Vec<String>>>,
        start: impl Into<String>,
    ) -> Result<Self, ParserError> {
        let name = name.into();
        let start = start.into();
        if name.is_empty() || start.is_empty() {
            return Err(ParserError::InvalidName);
        }

        let grammar = ingest::ingest(&productions, &start)?;
        let first = first::first_sets(&grammar.terminals, &grammar.nonterminals, &grammar.rules);
        let follow = follow::follow_sets(&grammar.nonterminals, &start, &first, &grammar.rules);
        let table = table::build(
            &grammar.terminals,
            &grammar.nonterminals,
            &first,
            &follow,
            &grammar.rules,
        );

        Ok(ParseTable {
            name,
            start,
            terminals: grammar.terminals,
            nonterminals: grammar.nonterminals,
            first,
            follow,
            rules: grammar.rules,
            cells: table.cells,
            rows: table.rows,
            cols: table.cols,
        })
    }

    /// The grammar's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The start nonterminal.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Every terminal symbol.
    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    /// Every nonterminal symbol.
    pub fn nonterminals(&self) -> &IndexSet<String> {
        &self.nonterminals
    }

    /// FIRST of every terminal and nonterminal.
    pub fn first(&self) -> &IndexMap<String, BTreeSet<Lookahead>> {
        &self.first
    }

    /// FOLLOW of every nonterminal.
    pub fn follow(&self) -> &IndexMap<String, BTreeSet<Lookahead>> {
        &self.follow
    }

    /// The flattened rules; the index is the id stored in table cells.
    pub fn rules(&self) -> &[(String, Vec<String>)] {
        &self.rules
    }

    /// The table as `(cells, row index, column index)`, row-major.
    pub fn table(
        &self,
    ) -> (
        &[Vec<BTreeSet<usize>>],
        &IndexMap<String, usize>,
        &IndexMap<Lookahead, usize>,
    ) {
        (&self.cells, &self.rows, &self.cols)
    }

    /// The cell selecting rules for `nonterminal` on `lookahead`.
    pub fn cell(&self, nonterminal: &str, lookahead: &Lookahead) -> Option<&BTreeSet<usize>> {
        let row = *self.rows.get(nonterminal)?;
        let col = *self.cols.get(lookahead)?;
        Some(&self.cells[row][col])
    }

    /// Every `(nonterminal, lookahead)` coordinate holding more than one
    /// rule, in row-major order.
    pub fn conflicts(&self) -> Vec<(&str, &Lookahead)> {
        let mut out = Vec::new();
        for (nonterminal, &row) in &self.rows {
            for (lookahead, &col) in &self.cols {
                if self.cells[row][col].len() > 1 {
                    out.push((nonterminal.as_str(), lookahead));
                }
            }
        }
        out
    }

    /// True when every cell holds at most one rule.
    pub fn is_ll1(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.len() <= 1))
    }
}
