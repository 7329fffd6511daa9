//! Bottom-up tree rewriting.
//!
//! A [`Fold`] turns one tree into another. The default methods rebuild only
//! what changed: a node whose folded children are all the original children
//! is returned as the very same [`Node`].

use crate::node::Node;

/// A tree-to-tree rewrite.
///
/// Implementors override [`Fold::fold_node`] to rewrite particular kinds and
/// call [`fold_descendants`] to keep recursing, or override
/// [`Fold::fold_children`] to rewrite sibling sequences as a whole.
///
/// # Example
///
/// ```
/// use quire_core::{Node, NodeKind, fold::{Fold, fold_descendants}};
///
/// struct Shout;
///
/// impl Fold for Shout {
///     fn fold_node(&mut self, node: &Node) -> Node {
///         match (node.kind(), node.text()) {
///             (NodeKind::Word, Some(text)) => node.clone().with_text(text.to_uppercase()),
///             _ => fold_descendants(self, node),
///         }
///     }
/// }
///
/// let tree = Node::new(NodeKind::Paragraph).with_child(Node::new(NodeKind::Word).with_text("hi"));
/// let loud = Shout.fold_node(&tree);
/// assert_eq!(loud.children()[0].text(), Some("HI"));
/// ```
pub trait Fold {
    /// Rewrite `node`. Recurses into traversable children by default.
    fn fold_node(&mut self, node: &Node) -> Node {
        fold_descendants(self, node)
    }

    /// Rewrite the children of `parent`. Folds each child in order by
    /// default.
    fn fold_children(&mut self, parent: &Node, children: &[Node]) -> Vec<Node> {
        let _ = parent;
        children.iter().map(|child| self.fold_node(child)).collect()
    }
}

/// Fold the children of `node` and rebuild it if any child changed.
///
/// Children of non-traversable nodes are never visited.
pub fn fold_descendants<F: Fold + ?Sized>(folder: &mut F, node: &Node) -> Node {
    if !node.kind().traversal().is_traversable() || node.is_leaf() {
        return node.clone();
    }
    let children = folder.fold_children(node, node.children());
    node.adopt_if_changed(children)
}
