//! Labeled source locations for diagnostic messages.

use quire_core::Location;

/// A message attached to a location in the source.
///
/// A diagnostic usually has one primary label marking where the problem is,
/// and optionally secondary labels giving context such as "first defined
/// here".
#[derive(Debug, Clone)]
pub struct Label {
    location: Location,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
