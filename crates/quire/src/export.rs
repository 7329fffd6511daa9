//! Output backends for mangled trees.
//!
//! # Pipeline Position
//!
//! ```text
//! Tree notation
//!     ↓ read
//! Raw syntax tree
//!     ↓ mangle
//! Resolved syntax tree
//!     ↓ export (this module)
//! Output text
//! ```
//!
//! # Available Backends
//!
//! - [`notation`] - the indented tree notation, readable back
//! - [`text`] - plain text built on [`quire_core::walk`]

pub mod notation;
pub mod text;

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use quire_core::{Node, NodeKind};

/// Abstraction for export backends.
pub trait Exporter {
    /// Exports a mangled tree to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmangled`] if the tree still holds nodes the
    /// pipeline should have consumed.
    fn export_tree(&mut self, tree: &Node) -> Result<String, Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`QuireError::Export`] at the crate boundary.
///
/// [`QuireError::Export`]: crate::QuireError::Export
#[derive(Debug, Error)]
pub enum Error {
    /// A node kind that only exists before mangling.
    #[error("{0} cannot appear in a mangled tree")]
    Unmangled(NodeKind),
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Fmt(#[from] fmt::Error),
}

/// The output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// The tree notation.
    #[default]
    Notation,
    /// Plain text.
    Text,
}

impl Format {
    /// A fresh exporter for this format.
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Format::Notation => Box::new(notation::NotationExporter),
            Format::Text => Box::new(text::TextExporter::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Notation => "notation",
            Format::Text => "text",
        }
    }
}

/// Error returned when a format name is not known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format `{0}` (expected `notation` or `text`)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notation" => Ok(Format::Notation),
            "text" => Ok(Format::Text),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!("text".parse::<Format>(), Ok(Format::Text));
        assert_eq!(Format::Notation.to_string(), "notation");
        assert!("svg".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: Format,
        }

        let wrapper: Wrapper = toml::from_str(r#"format = "text""#).unwrap();
        assert_eq!(wrapper.format, Format::Text);
    }
}
