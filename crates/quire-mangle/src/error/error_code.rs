//! Error codes for the Quire diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Tree notation errors
//! - `E1xx` - Designator errors
//! - `E2xx` - Level structure errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Notation Errors (E0xx)
    // =========================================================================
    /// Unterminated string.
    ///
    /// A node text was opened with a quote but never closed.
    E001,

    /// Unexpected character.
    ///
    /// A character was encountered that cannot start or continue a node.
    E002,

    /// Invalid escape sequence.
    ///
    /// Valid escapes are `\"`, `\\`, `\n`, `\t` and `\u{...}`.
    E003,

    /// Unknown node kind.
    ///
    /// The kind name after an opening parenthesis is not part of the
    /// node-kind taxonomy.
    E004,

    /// Unbalanced parentheses or incomplete input.
    ///
    /// The input ended before every open node was closed.
    E005,

    /// Trailing input.
    ///
    /// Something other than whitespace or comments follows the root node.
    E006,

    /// Nesting too deep.
    ///
    /// Nodes are nested deeper than the reader accepts.
    E007,

    // =========================================================================
    // Designator Errors (E1xx)
    // =========================================================================
    /// Relative identifier without an enclosing identifier.
    ///
    /// A relative identifier can only be resolved under an ancestor carrying
    /// an explicit identifier.
    E100,

    /// Colliding explicit identifier.
    ///
    /// The same explicit identifier was given to more than one node. The
    /// first definition wins; this is reported as a warning.
    E101,

    /// Malformed identifier.
    ///
    /// An identifier node has no text or contains an empty segment.
    E102,

    // =========================================================================
    // Level Errors (E2xx)
    // =========================================================================
    /// Level depth jump.
    ///
    /// A level introducer is more than one level deeper than the enclosing
    /// level.
    E200,

    /// Malformed level introducer.
    ///
    /// The introducer has no indent, or its indent is not a run of at least
    /// two `=`.
    E201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Notation errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            ErrorCode::E007 => "E007",
            // Designator errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Level errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Notation errors
            ErrorCode::E001 => "unterminated string",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "invalid escape sequence",
            ErrorCode::E004 => "unknown node kind",
            ErrorCode::E005 => "unbalanced or incomplete input",
            ErrorCode::E006 => "trailing input",
            ErrorCode::E007 => "nesting too deep",
            // Designator errors
            ErrorCode::E100 => "relative identifier without enclosing identifier",
            ErrorCode::E101 => "colliding explicit identifier",
            ErrorCode::E102 => "malformed identifier",
            // Level errors
            ErrorCode::E200 => "level depth jump",
            ErrorCode::E201 => "malformed level introducer",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
