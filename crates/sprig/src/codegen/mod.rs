//! Source emission for compiled tables.
//!
//! A [`Backend`] renders a compiled scanner and/or parse table as source in
//! one target language. [`generate`] wraps a backend's `translate` with the
//! input/output validation every target shares, and [`backend`] resolves a
//! language name to its implementation.

mod c;
mod python;

use indexmap::IndexMap;

use crate::parser::ParseTable;
use crate::scanner::ScannerDfa;

/// How the generated program encodes the compiled automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Data tables walked by a generic driver loop.
    #[default]
    Table,
    /// Control flow specialized per state.
    Direct,
}

/// Which lexeme a generated scanner reports when several lengths accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    #[default]
    Longest,
    Shortest,
}

/// Choices shared by every backend.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Base filename the backend derives its output names from.
    pub base: String,
    pub encoding: Encoding,
    pub match_policy: MatchPolicy,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            base: "out".to_owned(),
            encoding: Encoding::default(),
            match_policy: MatchPolicy::default(),
        }
    }
}

/// One code-generation request.
#[derive(Clone, Copy)]
pub struct Job<'a> {
    pub scanner: Option<&'a ScannerDfa>,
    pub parser: Option<&'a ParseTable>,
    pub options: &'a CodegenOptions,
}

/// Code-generation failure categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    /// Neither a scanner nor a parser was supplied.
    #[error("nothing to generate: provide a scanner and/or a parser")]
    NothingToGenerate,

    /// The backend returned an empty file set.
    #[error("backend produced no output")]
    EmptyOutput,

    /// The backend returned an empty filename or empty content.
    #[error("backend produced an unnamed or empty file")]
    InvalidOutput,

    /// The backend does not implement the requested encoding.
    #[error("the {backend} backend does not support the {encoding:?} encoding")]
    Unsupported {
        backend: &'static str,
        encoding: Encoding,
    },

    /// No backend is registered under the given name.
    #[error("unknown target language `{0}`")]
    UnknownLanguage(String),
}

/// A target language.
pub trait Backend {
    /// The name this backend is registered under.
    fn language(&self) -> &'static str;

    /// Render `job` into filename/content pairs.
    fn translate(&self, job: &Job<'_>) -> Result<IndexMap<String, String>, CodegenError>;
}

/// Run `backend` over `job` with shared validation on both sides.
pub fn generate(
    backend: &dyn Backend,
    job: &Job<'_>,
) -> Result<IndexMap<String, String>, CodegenError> {
    if job.scanner.is_none() && job.parser.is_none() {
        return Err(CodegenError::NothingToGenerate);
    }

    let files = backend.translate(job)?;

    if files.is_empty() {
        return Err(CodegenError::EmptyOutput);
    }
    for (name, content) in &files {
        if name.is_empty() || content.is_empty() {
            return Err(CodegenError::InvalidOutput);
        }
    }
    Ok(files)
}

/// Resolve a language name to its backend.
pub fn backend(language: &str) -> Result<Box<dyn Backend>, CodegenError> {
    match language {
        "c" => Ok(Box::new(c::CBackend)),
        "python" => Ok(Box::new(python::PythonBackend)),
        other => Err(CodegenError::UnknownLanguage(other.to_owned())),
    }
}

/// Every registered language name.
pub fn languages() -> &'static [&'static str] {
    &["c", "python"]
}
