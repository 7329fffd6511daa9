//! The immutable syntax tree node.
//!
//! A [`Node`] is a cheap-to-clone handle to shared, immutable node data.
//! Rewriting a tree never mutates a node: every change produces new nodes
//! for the rewritten part, while untouched children are shared with the
//! original tree.
//!
//! # Example
//!
//! ```
//! use quire_core::{Node, NodeKind};
//!
//! let word = Node::new(NodeKind::Word).with_text("hello");
//! let paragraph = Node::new(NodeKind::Paragraph).with_child(word.clone());
//!
//! let tagged = paragraph.inserting_child(0, Node::new(NodeKind::Tag).with_text("draft"));
//! assert_eq!(tagged.child_count(), 2);
//! assert!(Node::ptr_eq(&tagged.children()[1], &word));
//! assert_eq!(paragraph.to_string(), r#"(PARAGRAPH (WORD "hello"))"#);
//! ```

use std::{fmt, sync::Arc};

use crate::{kind::NodeKind, location::Location};

#[derive(Clone)]
struct NodeData {
    kind: NodeKind,
    text: Option<String>,
    location: Option<Location>,
    children: Vec<Node>,
}

/// A syntax tree node: kind, optional text, optional location and ordered
/// children.
///
/// Equality is structural over kind, text and children. Locations are
/// ignored, since synthesized nodes have none.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Create a childless node without text or location.
    pub fn new(kind: NodeKind) -> Self {
        Self(Arc::new(NodeData {
            kind,
            text: None,
            location: None,
            children: Vec::new(),
        }))
    }

    /// Set the text of this node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.0).text = Some(text.into());
        self
    }

    /// Set the source location of this node.
    pub fn with_location(mut self, location: Location) -> Self {
        Arc::make_mut(&mut self.0).location = Some(location);
        self
    }

    /// Set the source location of this node, if there is one.
    pub fn with_location_opt(mut self, location: Option<Location>) -> Self {
        Arc::make_mut(&mut self.0).location = location;
        self
    }

    /// Change the kind of this node, keeping its payload.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        Arc::make_mut(&mut self.0).kind = kind;
        self
    }

    /// Append a child to this node.
    pub fn with_child(mut self, child: Node) -> Self {
        Arc::make_mut(&mut self.0).children.push(child);
        self
    }

    /// Append children to this node.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        Arc::make_mut(&mut self.0).children.extend(children);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    pub fn text(&self) -> Option<&str> {
        self.0.text.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.0.location.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.0.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.0.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.0.children.is_empty()
    }

    /// Returns `true` if this node has a direct child of the given kind.
    pub fn has_child_of_kind(&self, kind: NodeKind) -> bool {
        self.0.children.iter().any(|child| child.kind() == kind)
    }

    /// Returns `true` if both handles share the same allocation.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Build a node with the same kind, text and location, and new children.
    pub fn adopt(&self, children: Vec<Node>) -> Node {
        Self(Arc::new(NodeData {
            kind: self.0.kind,
            text: self.0.text.clone(),
            location: self.0.location.clone(),
            children,
        }))
    }

    /// Like [`Node::adopt`], but returns this very node when `children`
    /// are the current children.
    pub fn adopt_if_changed(&self, children: Vec<Node>) -> Node {
        let unchanged = children.len() == self.child_count()
            && children
                .iter()
                .zip(self.children())
                .all(|(new, old)| Node::ptr_eq(new, old));
        if unchanged {
            self.clone()
        } else {
            self.adopt(children)
        }
    }

    /// Build a copy of this node where the child at `index` is replaced.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replacing_child(&self, index: usize, child: Node) -> Node {
        let mut children = self.0.children.clone();
        children[index] = child;
        self.adopt(children)
    }

    /// Build a copy of this node without the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn removing_child(&self, index: usize) -> Node {
        let mut children = self.0.children.clone();
        children.remove(index);
        self.adopt(children)
    }

    /// Build a copy of this node with `child` inserted at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > child_count()`.
    pub fn inserting_child(&self, index: usize, child: Node) -> Node {
        let mut children = self.0.children.clone();
        children.insert(index, child);
        self.adopt(children)
    }

    /// Count the nodes of this subtree, this node included.
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_size).sum::<usize>()
    }

    fn write_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        for child in self.children() {
            f.write_str(" ")?;
            child.write_compact(f)?;
        }
        f.write_str(")")
    }

    fn write_pretty(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if self.children().iter().all(Node::is_leaf) {
            return self.write_compact(f);
        }
        self.write_header(f)?;
        for child in self.children() {
            write!(f, "\n{:width$}", "", width = (depth + 1) * 2)?;
            child.write_pretty(f, depth + 1)?;
        }
        f.write_str(")")
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.kind())?;
        if let Some(text) = self.text() {
            f.write_str(" \"")?;
            for c in text.chars() {
                match c {
                    '"' => f.write_str("\\\"")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    '\t' => f.write_str("\\t")?,
                    c if c.is_control() => write!(f, "\\u{{{:X}}}", c as u32)?,
                    c => write!(f, "{c}")?,
                }
            }
            f.write_str("\"")?;
        }
        Ok(())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other)
            || (self.0.kind == other.0.kind
                && self.0.text == other.0.text
                && self.0.children == other.0.children)
    }
}

impl Eq for Node {}

/// Writes the tree notation: compact on one line, or indented with `{:#}`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_pretty(f, 0)
        } else {
            self.write_compact(f)
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_compact(f)
    }
}
