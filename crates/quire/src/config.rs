//! Configuration types for the Quire compiler.
//!
//! All types implement [`serde::Deserialize`], so a configuration can be
//! loaded from a TOML file:
//!
//! ```toml
//! [filter]
//! tags = ["draft", "Intro"]
//!
//! [separators]
//! strip_whitespace = false
//!
//! [output]
//! format = "text"
//! ```
//!
//! # Example
//!
//! ```
//! # use quire::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.filter().tags().is_empty());
//! assert!(config.separators().strip_whitespace());
//! ```

use serde::Deserialize;

use quire_core::tag::{Tag, TagSet};
use quire_mangle::MangleOptions;

use crate::export::Format;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tag filter section.
    #[serde(default)]
    filter: FilterConfig,

    /// Separator normalization section.
    #[serde(default)]
    separators: SeparatorConfig,

    /// Output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(filter: FilterConfig, separators: SeparatorConfig, output: OutputConfig) -> Self {
        Self {
            filter,
            separators,
            output,
        }
    }

    /// Returns the tag filter configuration.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Returns the separator configuration.
    pub fn separators(&self) -> &SeparatorConfig {
        &self.separators
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Adds tags to the filter.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        for tag in tags {
            if !self.filter.tags.contains(&tag) {
                self.filter.tags.push(tag);
            }
        }
        self
    }

    /// Overrides the output format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.output.format = format;
        self
    }

    /// The pipeline options this configuration selects.
    pub fn mangle_options(&self) -> MangleOptions {
        MangleOptions {
            tag_filter: self.filter.tag_set(),
            strip_whitespace: self.separators.strip_whitespace,
        }
    }
}

/// Tags to keep; an empty list keeps the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    tags: Vec<Tag>,
}

impl FilterConfig {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    /// Returns the configured tags, in configuration order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the configured tags as a set.
    pub fn tag_set(&self) -> TagSet {
        self.tags.iter().copied().collect()
    }
}

/// Separator normalization settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeparatorConfig {
    /// Drop whitespace and line break nodes.
    strip_whitespace: bool,
}

impl SeparatorConfig {
    pub fn new(strip_whitespace: bool) -> Self {
        Self { strip_whitespace }
    }

    pub fn strip_whitespace(&self) -> bool {
        self.strip_whitespace
    }
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            strip_whitespace: true,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// The [`Format`] written by default.
    #[serde(default)]
    format: Format,
}

impl OutputConfig {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [filter]
            tags = ["draft", "Intro"]

            [separators]
            strip_whitespace = false

            [output]
            format = "text"
            "#,
        )
        .unwrap();

        let names: Vec<_> = config.filter().tags().iter().map(Tag::name).collect();
        assert_eq!(names, ["draft", "Intro"]);
        assert!(!config.separators().strip_whitespace());
        assert_eq!(config.output().format(), Format::Text);

        let options = config.mangle_options();
        assert_eq!(options.tag_filter.len(), 2);
        assert!(!options.strip_whitespace);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("[separators]\n").unwrap();

        assert!(config.filter().tags().is_empty());
        assert!(config.separators().strip_whitespace());
        assert_eq!(config.output().format(), Format::Notation);
    }

    #[test]
    fn test_invalid_tag_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[filter]\ntags = [\"two words\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_tags([Tag::new("a").unwrap(), Tag::new("a").unwrap()])
            .with_format(Format::Text);

        assert_eq!(config.filter().tags().len(), 1);
        assert_eq!(config.output().format(), Format::Text);
    }
}
