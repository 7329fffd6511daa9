//! Tags, interned for cheap copies and comparisons.
//!
//! A [`Tag`] is a short, case-sensitive label. Tag names are stored once in
//! a global string interner, so a tag is a `Copy` handle; ordering still
//! follows the tag names.

use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock},
};

use serde::Deserialize;
use string_interner::{DefaultStringInterner, DefaultSymbol};
use thiserror::Error;

/// Global string interner for tag names.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Errors raised for invalid tag names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("a tag name cannot be empty")]
    Empty,

    #[error("a tag name cannot contain whitespace: `{0}`")]
    Whitespace(String),
}

/// A set of tags, ordered by name.
pub type TagSet = BTreeSet<Tag>;

/// An interned tag name.
///
/// # Examples
///
/// ```
/// use quire_core::tag::Tag;
///
/// let draft = Tag::new("draft").unwrap();
/// assert_eq!(draft, "draft");
/// assert_eq!(draft.source_form(), "@draft");
/// assert!(Tag::new("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Tag(DefaultSymbol);

impl Tag {
    /// Creates a `Tag` from its name.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or contains whitespace.
    pub fn new(name: &str) -> Result<Self, TagError> {
        if name.is_empty() {
            return Err(TagError::Empty);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(TagError::Whitespace(name.to_string()));
        }
        Ok(Self(interner().get_or_intern(name)))
    }

    /// Returns the tag name.
    pub fn name(&self) -> String {
        interner()
            .resolve(self.0)
            .expect("Tag symbol should exist in interner")
            .to_string()
    }

    /// Returns the tag as written in source, `@name`.
    pub fn source_form(&self) -> String {
        format!("@{}", self.name())
    }
}

/// Builds a [`TagSet`] from names.
///
/// # Errors
///
/// Returns the first invalid name's error.
pub fn tag_set<I, S>(names: I) -> Result<TagSet, TagError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|name| Tag::new(name.as_ref())).collect()
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        let interner = interner();
        let a = interner.resolve(self.0).unwrap_or_default();
        let b = interner.resolve(other.0).unwrap_or_default();
        a.cmp(b)
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Tag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        f.write_str(name)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_interning() {
        let a = Tag::new("chapter").unwrap();
        let b: Tag = "chapter".parse().unwrap();

        assert_eq!(a, b);
        assert_eq!(a.name(), "chapter");
        assert_eq!(a.to_string(), "chapter");
        assert_eq!(format!("{a:?}"), "Tag(chapter)");
    }

    #[test]
    fn test_tag_is_case_sensitive() {
        assert_ne!(Tag::new("Draft").unwrap(), Tag::new("draft").unwrap());
    }

    #[test]
    fn test_invalid_tags() {
        assert_eq!(Tag::new(""), Err(TagError::Empty));
        assert_eq!(
            Tag::new("two words"),
            Err(TagError::Whitespace("two words".to_string()))
        );
    }

    #[test]
    fn test_tag_set_orders_by_name() {
        // Interning order differs from name order.
        let _ = Tag::new("zebra").unwrap();
        let tags = tag_set(["zebra", "apple", "mango", "apple"]).unwrap();

        let names: Vec<_> = tags.iter().map(Tag::name).collect();
        assert_eq!(names, ["apple", "mango", "zebra"]);
    }
}
