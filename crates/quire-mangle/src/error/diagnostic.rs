//! The core diagnostic type.

use std::fmt;

use quire_core::Location;

use crate::error::{Severity, error_code::ErrorCode, label::Label};

/// A single error or warning with source locations.
///
/// # Example
///
/// ```text
/// error[E200]: level depth jumps from 1 to 3
///   --> book.quire:14:3
///    |
/// 14 |   (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "====")
///    |   ^ introducer at depth 3
///    |
///    = help: insert a depth 2 level first
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use quire_core::Location;
    /// # use quire_mangle::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("unknown node kind `PARA`")
    ///     .with_code(ErrorCode::E004)
    ///     .with_label(Location::new(3, 4), "not a node kind");
    /// assert_eq!(diag.to_string(), "error[E004]: unknown node kind `PARA`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Location of the first primary label, if any.
    pub fn primary_location(&self) -> Option<&Location> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::location)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label.
    pub fn with_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(location, message));
        self
    }

    /// Add a secondary label.
    pub fn with_secondary_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(location, message));
        self
    }

    /// Add a primary label when a location is known.
    ///
    /// Synthesized nodes carry no location; the diagnostic is then reported
    /// without a snippet.
    pub fn with_label_opt(self, location: Option<&Location>, message: impl Into<String>) -> Self {
        match location {
            Some(location) => self.with_label(location.clone(), message),
            None => self,
        }
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
        assert!(diag.primary_location().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("identifier `\\a` is defined multiple times")
            .with_code(ErrorCode::E101)
            .with_secondary_label(Location::new(1, 1), "first defined here")
            .with_label(Location::new(5, 2), "duplicate definition")
            .with_help("rename one of them");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels().len(), 2);
        assert_eq!(diag.primary_location(), Some(&Location::new(5, 2)));
        assert_eq!(diag.help(), Some("rename one of them"));
    }

    #[test]
    fn test_with_label_opt() {
        let with = Diagnostic::error("x").with_label_opt(Some(&Location::new(2, 2)), "here");
        let without = Diagnostic::error("x").with_label_opt(None, "here");

        assert_eq!(with.labels().len(), 1);
        assert!(without.labels().is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let coded = Diagnostic::error("level depth jumps from 1 to 3").with_code(ErrorCode::E200);
        let plain = Diagnostic::warning("nothing matched the tag filter");

        assert_eq!(coded.to_string(), "error[E200]: level depth jumps from 1 to 3");
        assert_eq!(plain.to_string(), "warning: nothing matched the tag filter");
    }
}
