//! Command-line argument definitions for the Quire CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, tag filtering, output format and logging verbosity.

use clap::Parser;

use quire::{Format, tag::Tag};

/// Command-line arguments for the Quire markup compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input tree notation file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.quire")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Keep only the parts tagged with this tag; repeatable
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<Tag>,

    /// Output format (notation, text); overrides the configuration
    #[arg(short, long)]
    pub format: Option<Format>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["quire", "book.quire"]).unwrap();

        assert_eq!(args.input, "book.quire");
        assert_eq!(args.output, "out.quire");
        assert_eq!(args.log_level, "info");
        assert!(args.tags.is_empty());
        assert!(args.format.is_none());
    }

    #[test]
    fn test_repeated_tags_and_format() {
        let args = Args::try_parse_from([
            "quire", "book.quire", "-t", "draft", "--tag", "Intro", "-f", "text",
        ])
        .unwrap();

        let names: Vec<_> = args.tags.iter().map(Tag::name).collect();
        assert_eq!(names, ["draft", "Intro"]);
        assert_eq!(args.format, Some(Format::Text));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Args::try_parse_from(["quire", "x", "-f", "svg"]).is_err());
        assert!(Args::try_parse_from(["quire", "x", "-t", "two words"]).is_err());
    }
}
