//! Regular expressions to a minimal DFA.
//!
//! The pipeline, in order:
//! - `lexer` - surface pattern to symbol stream
//! - `classes` - character classes/ranges to alternations
//! - `concat` - implicit concatenation made explicit
//! - `shunt` - infix to postfix
//! - `thompson` - postfix to a per-token epsilon NFA
//! - `nfa` - union of the per-token NFAs
//! - `subset` - epsilon-closure subset construction
//! - `totalize` - dense table with a sink state
//! - `hopcroft` - partition-refinement minimization
//! - `rename` - opaque labels for consumers
//!
//! [`ScannerDfa::compile`] runs the whole chain and freezes the result.

mod alphabet;
mod classes;
mod concat;
mod error;
mod hopcroft;
mod lexer;
mod nfa;
mod rename;
mod shunt;
mod subset;
mod symbol;
mod thompson;
mod totalize;

#[cfg(test)]
mod hopcroft_tests;
#[cfg(test)]
mod shunt_tests;
#[cfg(test)]
mod thompson_tests;

use indexmap::{IndexMap, IndexSet};

use crate::ids::StateId;

pub use error::ScannerError;
pub use symbol::{Op, Symbol};

/// Type-map entry naming the sink state, when the table needed one.
pub const SINK_TYPE: &str = "_sink";

/// A compiled scanner: the minimal DFA for a named set of token patterns.
///
/// Frozen at construction. Accessors hand out views into the artifact's own
/// storage; nothing here can be mutated afterwards, so sharing across
/// threads is safe.
#[derive(Debug, Clone)]
pub struct ScannerDfa {
    name: String,
    expressions: IndexMap<String, String>,
    states: IndexSet<StateId>,
    alphabet: IndexSet<char>,
    state_index: IndexMap<StateId, usize>,
    sym_index: IndexMap<char, usize>,
    table: Vec<Vec<StateId>>,
    start: StateId,
    accepting: IndexSet<StateId>,
    types: IndexMap<String, IndexSet<StateId>>,
}

impl ScannerDfa {
    /// Compile `expressions` (token name to pattern) into a minimal DFA.
    pub fn compile(
        name: impl Into<String>,
        expressions: IndexMap<String, String>,
    ) -> Result<Self, ScannerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ScannerError::InvalidName);
        }
        if expressions.is_empty() {
            return Err(ScannerError::InvalidSpecification);
        }

        let mut fragments = Vec::with_capacity(expressions.len());
        for (token, pattern) in &expressions {
            if token.is_empty() {
                return Err(ScannerError::InvalidName);
            }
            if pattern.is_empty() {
                return Err(ScannerError::EmptyPattern(token.clone()));
            }

            let symbols = lexer::lex(pattern)?;
            let symbols = classes::expand(&symbols)?;
            let symbols = concat::insert(&symbols);
            let postfix = shunt::shunt(&symbols)?;
            fragments.push(thompson::build(token, &postfix)?);
        }

        let merged = nfa::merge(fragments);
        let reachable = subset::construct(&merged);
        let total = totalize::totalize(reachable);
        let quotient = hopcroft::minimize(&total);
        let renamed = rename::rename(&quotient);

        Ok(ScannerDfa {
            name,
            expressions,
            states: renamed.states,
            alphabet: renamed.alphabet,
            state_index: renamed.state_index,
            sym_index: renamed.sym_index,
            table: renamed.table,
            start: renamed.start,
            accepting: renamed.finals,
            types: renamed.token_finals,
        })
    }

    /// The scanner's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original token name/pattern pairs, in input order.
    pub fn expressions(&self) -> &IndexMap<String, String> {
        &self.expressions
    }

    /// Every DFA state.
    pub fn states(&self) -> &IndexSet<StateId> {
        &self.states
    }

    /// Every character the DFA reacts to.
    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    /// The transition function as `(state index, symbol index, table)`,
    /// where `table[symbol][state]` is the successor.
    pub fn transitions(
        &self,
    ) -> (
        &IndexMap<StateId, usize>,
        &IndexMap<char, usize>,
        &[Vec<StateId>],
    ) {
        (&self.state_index, &self.sym_index, &self.table)
    }

    /// The start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The accepting states.
    pub fn accepting(&self) -> &IndexSet<StateId> {
        &self.accepting
    }

    /// Token name to the accepting states recognizing it, plus the
    /// [`SINK_TYPE`] entry when the table needed a sink.
    pub fn types(&self) -> &IndexMap<String, IndexSet<StateId>> {
        &self.types
    }

    /// One transition step; `None` when `on` is outside the alphabet or
    /// `from` is not a state of this DFA.
    pub fn step(&self, from: StateId, on: char) -> Option<StateId> {
        let q = *self.state_index.get(&from)?;
        let v = *self.sym_index.get(&on)?;
        Some(self.table[v][q])
    }

    /// Run the DFA over all of `input`; the token recognized when the walk
    /// ends in an accepting state, `None` otherwise.
    pub fn matches(&self, input: &str) -> Option<&str> {
        let mut state = self.start;
        for c in input.chars() {
            state = self.step(state, c)?;
        }
        self.token_of(state)
    }

    fn token_of(&self, state: StateId) -> Option<&str> {
        if !self.accepting.contains(&state) {
            return None;
        }
        self.types
            .iter()
            .find(|(token, finals)| *token != SINK_TYPE && finals.contains(&state))
            .map(|(token, _)| token.as_str())
    }
}
