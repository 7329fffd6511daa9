//! # Quire Mangle
//!
//! The tree mangling passes of the Quire markup compiler. A raw syntax tree,
//! as produced by a parser or read from the tree notation, goes through:
//!
//! 1. **Levels** - Flat level introducers become nested `LEVEL` nodes
//! 2. **Embedded lists** - List item markers are grouped into lists
//! 3. **Designators** - Explicit and implicit identifiers are resolved
//! 4. **Tags** - Tags are classified, promoted and filtered
//! 5. **Separators** - Whitespace and literal boundaries are normalized
//!
//! ## Usage
//!
//! ```
//! # use quire_mangle::{MangleError, MangleOptions, mangle, notation};
//!
//! fn main() -> Result<(), MangleError> {
//!     let raw = notation::read(
//!         r#"(DOCUMENT
//!              (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (LEVEL_TITLE (WORD "Usage")))
//!              (PARAGRAPH (WORD "Hello") (WHITESPACE " ") (WORD "world")))"#,
//!         Some("usage.quire"),
//!     )?;
//!
//!     let mangled = mangle(&raw, &MangleOptions::default())?;
//!     println!("{}", notation::write(&mangled.tree));
//!     Ok(())
//! }
//! ```

pub mod designator;
pub mod error;
pub mod implicit;
pub mod level;
pub mod list;
pub mod notation;
pub mod separator;
pub mod tag;

mod pipeline;

pub use designator::Designators;
pub use error::{Diagnostic, ErrorCode, MangleError, Severity};
pub use pipeline::{MangleOptions, Mangled, PASSES, Pass, mangle};
