//! sprig: compile lexical and syntactic specifications into table form.
//!
//! Two independent compilation pipelines, invoked separately:
//! - `scanner` - named regular expressions to a minimal total-transition DFA
//! - `parser` - a BNF grammar to an LL(1) predictive parse table
//!
//! Around them:
//! - `codegen` - render compiled tables as source in a target language
//! - `spec` - JSON specification documents consumed by the CLI
//!
//! Both pipelines produce immutable artifacts: construction either succeeds
//! completely or fails with a categorical error, and the accessors on a built
//! artifact never fail and never expose mutable state.

pub mod codegen;
pub mod ids;
pub mod parser;
pub mod scanner;
pub mod spec;

pub use ids::StateId;
pub use parser::{Lookahead, ParseTable, ParserError};
pub use scanner::{ScannerDfa, ScannerError};
