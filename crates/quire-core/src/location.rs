//! Source locations attached to syntax tree nodes.

use std::{fmt, sync::Arc};

/// A position in a source document.
///
/// Lines and columns are 1-based. The source name is shared between all
/// locations of a document, so cloning a location never copies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    source_name: Option<Arc<str>>,
    line: usize,
    column: usize,
}

impl Location {
    /// Create a location without a source name.
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            source_name: None,
            line,
            column,
        }
    }

    /// Attach a source name to this location.
    pub fn with_source_name(mut self, source_name: impl Into<Arc<str>>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Get the 1-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the 1-based column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Get the source name, if any.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.source_name {
            write!(f, "{name}:")?;
        }
        write!(f, "{}:{}", self.line, self.column)
    }
}
