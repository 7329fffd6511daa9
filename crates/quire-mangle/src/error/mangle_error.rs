//! The error type returned by the mangling pipeline.

use thiserror::Error;

use crate::error::Diagnostic;

/// A type alias for `Result<T, MangleError>`.
pub type Result<T> = std::result::Result<T, MangleError>;

/// One or more diagnostics, at least one of which is fatal.
#[derive(Debug, Error)]
#[error("{}", summary(.diagnostics))]
pub struct MangleError {
    diagnostics: Vec<Diagnostic>,
}

impl MangleError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// The first diagnostic, and how many follow it.
fn summary(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => String::new(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (+{} more)", rest.len()),
    }
}

impl From<Diagnostic> for MangleError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for MangleError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
