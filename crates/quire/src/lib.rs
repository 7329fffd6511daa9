//! Quire - A lightweight markup compiler.
//!
//! Reads raw syntax trees written in the Quire tree notation, runs them
//! through the mangling pipeline and renders the resolved tree.

pub mod config;
pub mod export;

mod error;

pub use quire_core::{Location, Node, NodeKind, identifier, tag};
pub use quire_mangle::{Designators, Diagnostic, ErrorCode, MangleError, Mangled, Severity};

pub use error::QuireError;
pub use export::Format;

use log::{debug, info, trace};

use quire_mangle::notation;

use config::AppConfig;

/// Builder for compiling and rendering Quire documents.
///
/// # Examples
///
/// ```rust
/// use quire::{DocumentBuilder, Format, config::AppConfig};
///
/// let source = r#"(DOCUMENT (PARAGRAPH (WORD "Hello") (WHITESPACE " ") (WORD "world")))"#;
///
/// // With custom config
/// let builder = DocumentBuilder::new(AppConfig::default());
///
/// // Read and mangle in one go
/// let mangled = builder.compile(source)
///     .expect("Failed to compile");
///
/// // Render the resolved tree
/// let text = builder.render(&mangled, Format::Text)
///     .expect("Failed to render");
/// assert_eq!(text, "Hello world\n");
///
/// // Or use default config
/// let builder = DocumentBuilder::default();
/// ```
#[derive(Default)]
pub struct DocumentBuilder {
    config: AppConfig,
    source_name: Option<String>,
}

impl DocumentBuilder {
    /// Create a new document builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including tag filter and output settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            source_name: None,
        }
    }

    /// Name the source in diagnostic locations, typically its file path.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// The configuration of this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read tree notation into a raw syntax tree.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Mangle` for malformed notation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quire::{DocumentBuilder, NodeKind};
    ///
    /// let builder = DocumentBuilder::default();
    /// let tree = builder.read(r#"(DOCUMENT (PARAGRAPH (WORD "x")))"#)
    ///     .expect("Failed to read");
    /// assert_eq!(tree.kind(), NodeKind::Document);
    /// ```
    pub fn read(&self, source: &str) -> Result<Node, QuireError> {
        info!("Reading tree notation");

        let tree = notation::read(source, self.source_name.as_deref())
            .map_err(|err| QuireError::new_mangle_error(err, source))?;

        debug!(nodes = tree.subtree_size(); "Tree notation read");
        Ok(tree)
    }

    /// Run the mangling pipeline over a raw tree.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Mangle` for structural errors. The error carries
    /// no source text since the tree may not come from notation.
    pub fn mangle(&self, tree: &Node) -> Result<Mangled, QuireError> {
        let options = self.config.mangle_options();
        quire_mangle::mangle(tree, &options)
            .map_err(|err| QuireError::new_mangle_error(err, String::new()))
    }

    /// Read tree notation and mangle it.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Mangle`, with `source` attached, for malformed
    /// notation or structural errors.
    pub fn compile(&self, source: &str) -> Result<Mangled, QuireError> {
        let tree = self.read(source)?;

        let options = self.config.mangle_options();
        let mangled = quire_mangle::mangle(&tree, &options)
            .map_err(|err| QuireError::new_mangle_error(err, source))?;

        info!(warnings = mangled.diagnostics.len(); "Document compiled");
        trace!(tree:? = mangled.tree; "Mangled tree");
        Ok(mangled)
    }

    /// Render a mangled tree in the given format.
    ///
    /// # Errors
    ///
    /// Returns `QuireError::Export` when the backend cannot render the tree.
    pub fn render(&self, mangled: &Mangled, format: Format) -> Result<String, QuireError> {
        info!(format = format.as_str(); "Rendering document");
        let output = format.exporter().export_tree(&mangled.tree)?;
        debug!(bytes = output.len(); "Document rendered");
        Ok(output)
    }
}
