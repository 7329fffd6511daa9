//! The mangling pipeline.

use std::fmt;

use log::{debug, info, trace};

use quire_core::{Node, tag::TagSet};

use crate::{
    designator::{self, Designators},
    error::{Diagnostic, Result},
    level, list, separator, tag,
};

/// A stage of the mangling pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Nest level introducers into levels.
    Level,
    /// Group list item markers into lists.
    EmbeddedList,
    /// Resolve identifiers into markers.
    Designator,
    /// Classify, promote and filter tags.
    Tag,
    /// Normalize whitespace and literal separators.
    Separator,
}

/// The passes in the order [`mangle`] runs them.
///
/// Each pass expects the tree shape left by the ones before it.
pub const PASSES: [Pass; 5] = [
    Pass::Level,
    Pass::EmbeddedList,
    Pass::Designator,
    Pass::Tag,
    Pass::Separator,
];

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Pass::Level => "level",
            Pass::EmbeddedList => "embedded-list",
            Pass::Designator => "designator",
            Pass::Tag => "tag",
            Pass::Separator => "separator",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options of a pipeline run.
#[derive(Debug, Clone)]
pub struct MangleOptions {
    /// Tags to keep; empty keeps the whole document.
    pub tag_filter: TagSet,
    /// Drop whitespace and line break nodes.
    pub strip_whitespace: bool,
}

impl Default for MangleOptions {
    fn default() -> Self {
        Self {
            tag_filter: TagSet::new(),
            strip_whitespace: true,
        }
    }
}

/// The output of a pipeline run.
#[derive(Debug, Clone)]
pub struct Mangled {
    /// The fully resolved tree.
    pub tree: Node,
    /// Identifiers, keyed against [`Mangled::tree`].
    pub designators: Designators,
    /// Warnings raised along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run every pass of [`PASSES`] over `tree`.
///
/// # Errors
///
/// Returns the first structural error raised by a pass. Warnings are
/// collected in [`Mangled::diagnostics`] instead.
///
/// # Example
///
/// ```
/// use quire_core::identifier::FragmentIdentifier;
/// use quire_mangle::{MangleOptions, mangle, notation};
///
/// let tree = notation::read(
///     r#"(DOCUMENT
///          (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (LEVEL_TITLE (WORD "Intro")))
///          (PARAGRAPH (WORD "Hello") (WHITESPACE " ") (WORD "world")))"#,
///     None,
/// )?;
///
/// let mangled = mangle(&tree, &MangleOptions::default())?;
/// let intro: FragmentIdentifier = "Intro".parse()?;
/// assert!(mangled.designators.get(&intro).is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn mangle(tree: &Node, options: &MangleOptions) -> Result<Mangled> {
    info!(nodes = tree.subtree_size(); "Mangling tree");

    let mut tree = tree.clone();
    let mut designators = Designators::unresolved(&tree);
    let mut diagnostics = Vec::new();

    for pass in PASSES {
        debug!(pass = pass.name(); "Running pass");
        tree = match pass {
            Pass::Level => level::build_levels(&tree)?,
            Pass::EmbeddedList => list::build_lists(&tree),
            Pass::Designator => {
                let (resolved, warnings) = designator::resolve(&tree)?;
                diagnostics.extend(warnings);
                designators = resolved;
                designators.tree().clone()
            }
            Pass::Tag => {
                let classified = tag::classify(&tree);
                let mut promoted = tag::explicit_tags(&classified);
                promoted.extend(options.tag_filter.iter().copied());
                let promoted = tag::promote(&classified, &promoted);
                let filtered = tag::filter(&promoted, &options.tag_filter);
                if options.tag_filter.is_empty() {
                    filtered
                } else {
                    // Pruned levels no longer collide with the ones left.
                    let (resolved, warnings) = designator::resolve(&filtered)?;
                    diagnostics = warnings;
                    designators = resolved;
                    designators.tree().clone()
                }
            }
            Pass::Separator => separator::normalize(&tree, options.strip_whitespace),
        };
        trace!(pass = pass.name(), nodes = tree.subtree_size(); "Pass complete");
    }

    let designators = designators.relocate(&tree);
    debug!(
        pure = designators.pure_identifiers().len(),
        derived = designators.derived_identifiers().len(),
        warnings = diagnostics.len();
        "Tree mangled"
    );

    Ok(Mangled {
        tree,
        designators,
        diagnostics,
    })
}
