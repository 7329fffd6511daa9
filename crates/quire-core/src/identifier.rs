//! Hierarchical fragment identifiers.
//!
//! A [`FragmentIdentifier`] is a root-anchored, non-empty sequence of
//! segments naming a fragment of a document, written `\part\chapter`.
//! Relative identifiers ([`RelativeIdentifier`]) only make sense under an
//! enclosing identifier and have to be resolved before they can be used
//! as a lookup key.
//!
//! # Example
//!
//! ```
//! use quire_core::identifier::{FragmentIdentifier, RelativeIdentifier};
//!
//! let parent: FragmentIdentifier = "\\foo".parse().unwrap();
//! let relative = RelativeIdentifier::new(["bar"]).unwrap();
//!
//! let resolved = relative.resolve(Some(&parent)).unwrap();
//! assert_eq!(resolved.to_string(), "\\foo\\bar");
//! assert!(relative.resolve(None).is_err());
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Separator between identifier segments.
pub const SEGMENT_SEPARATOR: char = '\\';

/// Errors raised while building or resolving identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("an identifier needs at least one segment")]
    Empty,

    #[error("invalid identifier segment `{0}`")]
    InvalidSegment(String),

    #[error("relative identifier `{0}` has no enclosing identifier to resolve against")]
    MissingParent(String),
}

/// A fully resolved, root-anchored identifier.
///
/// Absolute identifiers written in source and composite identifiers built
/// from a parent and relative segments share this representation; it is the
/// canonical lookup key for fragments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentIdentifier {
    segments: Vec<String>,
}

impl FragmentIdentifier {
    /// Create an identifier anchored at the document root.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no segment, or if a segment is empty or
    /// contains the separator.
    pub fn absolute<I, S>(segments: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = checked_segments(segments)?;
        Ok(Self { segments })
    }

    /// Create an identifier by appending relative segments to `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no segment or a segment is invalid.
    pub fn composite<I, S>(parent: &FragmentIdentifier, segments: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = parent.segments.clone();
        all.extend(checked_segments(segments)?);
        Ok(Self { segments: all })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The identifier one level up, `None` for a single-segment identifier.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Returns `true` if `other` is a direct child of this identifier.
    pub fn is_parent_of(&self, other: &FragmentIdentifier) -> bool {
        other.parent().as_ref() == Some(self)
    }

    /// The canonical textual form, `\` followed by `\`-separated segments.
    pub fn absolute_representation(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FragmentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{SEGMENT_SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

/// Parses `\a\b` as well as `a\b`.
impl FromStr for FragmentIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix(SEGMENT_SEPARATOR).unwrap_or(s);
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Self::absolute(trimmed.split(SEGMENT_SEPARATOR))
    }
}

/// Segments that only make sense under an enclosing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeIdentifier {
    segments: Vec<String>,
}

impl RelativeIdentifier {
    /// Create a relative identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no segment or a segment is invalid.
    pub fn new<I, S>(segments: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = checked_segments(segments)?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve against the enclosing identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::MissingParent`] when there is no
    /// enclosing identifier.
    pub fn resolve(
        &self,
        parent: Option<&FragmentIdentifier>,
    ) -> Result<FragmentIdentifier, IdentifierError> {
        let parent = parent.ok_or_else(|| IdentifierError::MissingParent(self.to_string()))?;
        FragmentIdentifier::composite(parent, self.segments.iter().cloned())
    }
}

impl fmt::Display for RelativeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(&SEGMENT_SEPARATOR.to_string()))
    }
}

impl FromStr for RelativeIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix(SEGMENT_SEPARATOR).unwrap_or(s);
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Self::new(trimmed.split(SEGMENT_SEPARATOR))
    }
}

fn checked_segments<I, S>(segments: I) -> Result<Vec<String>, IdentifierError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
    if segments.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if let Some(bad) = segments
        .iter()
        .find(|segment| segment.is_empty() || segment.contains(SEGMENT_SEPARATOR))
    {
        return Err(IdentifierError::InvalidSegment(bad.clone()));
    }
    Ok(segments)
}
