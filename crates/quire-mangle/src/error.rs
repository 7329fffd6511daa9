//! Error and diagnostic system for the Quire mangling pipeline.
//!
//! Errors and warnings are reported as [`Diagnostic`]s: a severity, an
//! optional [`ErrorCode`], a message, labeled source locations and optional
//! help. Fatal diagnostics are wrapped in a [`MangleError`] and returned
//! from the failing pass; warnings travel alongside the resulting tree.
//!
//! # Example
//!
//! ```
//! # use quire_core::Location;
//! # use quire_mangle::error::{Diagnostic, ErrorCode};
//!
//! let duplicate = Location::new(12, 3);
//! let original = Location::new(4, 3);
//!
//! let diag = Diagnostic::warning("identifier `\\intro` is defined multiple times")
//!     .with_code(ErrorCode::E101)
//!     .with_label(duplicate, "duplicate definition")
//!     .with_secondary_label(original, "first defined here")
//!     .with_help("rename one of the identifiers");
//! assert!(diag.severity().is_warning());
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod mangle_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use mangle_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use mangle_error::MangleError;
pub use severity::Severity;
