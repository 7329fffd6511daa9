//! Tree notation backend.

use log::debug;

use quire_core::Node;
use quire_mangle::notation;

use super::{Error, Exporter};

/// Writes the tree back in the notation it can be read from.
#[derive(Debug, Default)]
pub struct NotationExporter;

impl Exporter for NotationExporter {
    fn export_tree(&mut self, tree: &Node) -> Result<String, Error> {
        debug!(nodes = tree.subtree_size(); "Writing tree notation");
        Ok(notation::write(tree))
    }
}
