//! Persistent cursors over immutable syntax trees.
//!
//! A [`TreePath`] identifies one node of a tree by the sequence of child
//! indices leading to it from the root. Rewriting through a path rebuilds
//! only the nodes on the path, all the way up to a new root; every other
//! node is shared with the original tree, which stays valid and unchanged.
//!
//! Operations that insert or remove a child return a path to the *parent*
//! of the edited position. Paths to siblings of that position must be
//! re-derived afterwards, since their indices may have shifted.
//!
//! # Example
//!
//! ```
//! use quire_core::{Node, NodeKind, TreePath};
//!
//! let root = Node::new(NodeKind::Document).with_child(
//!     Node::new(NodeKind::Paragraph).with_child(Node::new(NodeKind::Word).with_text("old")),
//! );
//!
//! let word = TreePath::new(root.clone()).child(0).and_then(|p| p.child(0)).unwrap();
//! let rewritten = word.replace_end(Node::new(NodeKind::Word).with_text("new"));
//!
//! assert_eq!(rewritten.indices(), &[0, 0]);
//! assert_eq!(rewritten.end().text(), Some("new"));
//! assert_eq!(word.end().text(), Some("old"));
//! ```

use std::fmt;

use thiserror::Error;

use crate::node::Node;

/// Errors raised by structural edits through a [`TreePath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("the root of a tree has no parent")]
    NoParent,

    #[error("child index {index} is out of bounds for a node with {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A path from the root of a tree to one of its nodes.
///
/// The nodes along the path are cached, so reading any of them is O(1).
#[derive(Clone)]
pub struct TreePath {
    /// `nodes[0]` is the root, `nodes[k]` the node at depth `k`.
    nodes: Vec<Node>,
    /// `indices[k]` is the index of `nodes[k + 1]` among the children of `nodes[k]`.
    indices: Vec<usize>,
}

impl TreePath {
    /// Create a path to the root of a tree.
    pub fn new(root: Node) -> Self {
        Self {
            nodes: vec![root],
            indices: Vec::new(),
        }
    }

    /// Re-derive a path from an index vector.
    ///
    /// Returns `None` if `indices` does not address a node of `root`.
    pub fn from_indices(root: Node, indices: &[usize]) -> Option<Self> {
        indices
            .iter()
            .try_fold(Self::new(root), |path, &index| path.child(index))
    }

    /// The root of the tree this path was created against.
    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    /// The node this path leads to.
    pub fn end(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// The node at the given depth along this path, the root being at depth 0.
    pub fn at(&self, depth: usize) -> Option<&Node> {
        self.nodes.get(depth)
    }

    /// Number of steps from the root. The root path has depth 0.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    /// The index vector of this path.
    ///
    /// It stays a valid key for the same position after rewrites that do
    /// not change sibling counts above it.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The index of the end node among its siblings, `None` at the root.
    pub fn index_in_parent(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Extend this path to the child at `index` of its end node.
    pub fn child(&self, index: usize) -> Option<Self> {
        let child = self.end().child(index)?.clone();
        let mut path = self.clone();
        path.nodes.push(child);
        path.indices.push(index);
        Some(path)
    }

    /// Shorten this path by one step.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut path = self.clone();
        path.nodes.pop();
        path.indices.pop();
        Some(path)
    }

    /// The path to the following sibling, if there is one.
    pub fn next_sibling(&self) -> Option<Self> {
        let index = self.index_in_parent()?;
        self.parent()?.child(index + 1)
    }

    /// The path to the preceding sibling, if there is one.
    pub fn previous_sibling(&self) -> Option<Self> {
        let index = self.index_in_parent()?;
        self.parent()?.child(index.checked_sub(1)?)
    }

    /// Substitute the end node and rebuild every ancestor up to a new root.
    ///
    /// Only the nodes along the path are reconstructed; their other
    /// children are shared with the original tree.
    pub fn replace_end(&self, node: Node) -> Self {
        let mut nodes = self.nodes.clone();
        let last = nodes.len() - 1;
        nodes[last] = node;
        for depth in (0..last).rev() {
            let rebuilt = nodes[depth].replacing_child(self.indices[depth], nodes[depth + 1].clone());
            nodes[depth] = rebuilt;
        }
        Self {
            nodes,
            indices: self.indices.clone(),
        }
    }

    /// Remove the end node from its parent and return the path to the
    /// rebuilt parent.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoParent`] when called on the root.
    pub fn remove_end(&self) -> Result<Self, PathError> {
        let index = self.index_in_parent().ok_or(PathError::NoParent)?;
        let parent = self.parent().ok_or(PathError::NoParent)?;
        let rebuilt = parent.end().removing_child(index);
        Ok(parent.replace_end(rebuilt))
    }

    /// Insert `child` at `index` among the children of the end node and
    /// return the path to the rebuilt end node.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IndexOutOfBounds`] if `index` exceeds the child
    /// count of the end node.
    pub fn add_child_at(&self, child: Node, index: usize) -> Result<Self, PathError> {
        let len = self.end().child_count();
        if index > len {
            return Err(PathError::IndexOutOfBounds { index, len });
        }
        Ok(self.replace_end(self.end().inserting_child(index, child)))
    }

    /// Insert `child` before every other child of the end node.
    pub fn add_child_first(&self, child: Node) -> Self {
        self.replace_end(self.end().inserting_child(0, child))
    }

    /// Insert `child` after every other child of the end node.
    pub fn add_child_last(&self, child: Node) -> Self {
        let len = self.end().child_count();
        self.replace_end(self.end().inserting_child(len, child))
    }
}

impl fmt::Debug for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreePath")
            .field("indices", &self.indices)
            .field("end", &self.end().kind())
            .finish()
    }
}
