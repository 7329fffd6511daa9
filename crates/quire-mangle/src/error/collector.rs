//! Collector for accumulating diagnostics during a pass.

use crate::error::{Diagnostic, MangleError};

/// Accumulates the diagnostics of a pass.
///
/// Passes emit warnings and errors as they go; [`DiagnosticCollector::finish`]
/// turns the collection into a result.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Returns the warnings when nothing fatal was emitted, otherwise a
    /// [`MangleError`] carrying every diagnostic.
    pub fn finish(self) -> Result<Vec<Diagnostic>, MangleError> {
        if self.has_errors {
            Err(MangleError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
