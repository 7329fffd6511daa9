//! Error types for Quire operations.
//!
//! This module provides the main error type [`QuireError`] which wraps the
//! error conditions that can occur while compiling a document.

use std::io;

use thiserror::Error;

use quire_mangle::MangleError;

/// The main error type for Quire operations.
///
/// # Diagnostic Variants
///
/// The `Mangle` variant carries the diagnostics of the failing pass together
/// with the notation source they point into, so callers can render source
/// snippets.
#[derive(Debug, Error)]
pub enum QuireError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Mangle { err: MangleError, src: String },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for QuireError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl QuireError {
    /// Create a new `Mangle` error with the associated source code.
    pub fn new_mangle_error(err: MangleError, src: impl Into<String>) -> Self {
        Self::Mangle {
            err,
            src: src.into(),
        }
    }
}
