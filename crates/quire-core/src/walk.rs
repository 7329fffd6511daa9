//! Depth-first walking for output backends.
//!
//! [`walk`] drives a [`Walker`] over a tree, handing it an
//! `enter`/`text`/`exit` sequence per node. Non-traversable nodes are
//! delivered as one opaque unit: the walker sees their text, never their
//! children.

use log::trace;

use crate::{node::Node, path::TreePath};

/// Callbacks invoked by [`walk`].
pub trait Walker {
    type Error;

    /// Called before the text and children of the node at `path`.
    fn enter(&mut self, path: &TreePath) -> Result<(), Self::Error> {
        let _ = path;
        Ok(())
    }

    /// Called with the text of the node at `path`, if it has any.
    fn text(&mut self, path: &TreePath, text: &str) -> Result<(), Self::Error>;

    /// Called after the children of the node at `path`.
    fn exit(&mut self, path: &TreePath) -> Result<(), Self::Error> {
        let _ = path;
        Ok(())
    }
}

/// Walk `root` depth-first, children in order.
///
/// # Errors
///
/// Stops at and returns the first error raised by `walker`.
pub fn walk<W: Walker + ?Sized>(root: &Node, walker: &mut W) -> Result<(), W::Error> {
    trace!(nodes = root.subtree_size(); "Walking tree");
    walk_path(&TreePath::new(root.clone()), walker)
}

fn walk_path<W: Walker + ?Sized>(path: &TreePath, walker: &mut W) -> Result<(), W::Error> {
    walker.enter(path)?;
    let node = path.end();
    if node.kind().traversal().is_traversable() {
        if let Some(text) = node.text() {
            walker.text(path, text)?;
        }
        for index in 0..node.child_count() {
            if let Some(child) = path.child(index) {
                walk_path(&child, walker)?;
            }
        }
    } else {
        let text = opaque_text(node);
        if !text.is_empty() {
            walker.text(path, &text)?;
        }
    }
    walker.exit(path)
}

/// The text of a node taken as a unit: its own text, or the concatenated
/// text of its descendants.
pub fn opaque_text(node: &Node) -> String {
    match node.text() {
        Some(text) => text.to_string(),
        None => {
            let mut text = String::new();
            collect_text(node, &mut text);
            text
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.text() {
            out.push_str(text);
        }
        collect_text(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Walker for Recorder {
        type Error = std::convert::Infallible;

        fn enter(&mut self, path: &TreePath) -> Result<(), Self::Error> {
            self.events.push(format!("+{}", path.end().kind()));
            Ok(())
        }

        fn text(&mut self, _path: &TreePath, text: &str) -> Result<(), Self::Error> {
            self.events.push(text.to_string());
            Ok(())
        }

        fn exit(&mut self, path: &TreePath) -> Result<(), Self::Error> {
            self.events.push(format!("-{}", path.end().kind()));
            Ok(())
        }
    }

    #[test]
    fn test_walk_order() {
        let tree = Node::new(NodeKind::Paragraph).with_children([
            Node::new(NodeKind::Word).with_text("a"),
            Node::new(NodeKind::Word).with_text("b"),
        ]);
        let mut recorder = Recorder::default();

        walk(&tree, &mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            ["+PARAGRAPH", "+WORD", "a", "-WORD", "+WORD", "b", "-WORD", "-PARAGRAPH"]
        );
    }

    #[test]
    fn test_non_traversable_is_opaque() {
        let literal = Node::new(NodeKind::LinesOfLiteral).with_children([
            Node::new(NodeKind::Word).with_text("let"),
            Node::new(NodeKind::Whitespace).with_text(" "),
            Node::new(NodeKind::Word).with_text("x"),
        ]);
        let mut recorder = Recorder::default();

        walk(&literal, &mut recorder).unwrap();

        assert_eq!(recorder.events, ["+LINES_OF_LITERAL", "let x", "-LINES_OF_LITERAL"]);
    }

    #[test]
    fn test_opaque_text_prefers_own_text() {
        let url = Node::new(NodeKind::Url)
            .with_text("https://example.org")
            .with_child(Node::new(NodeKind::Word).with_text("ignored"));

        assert_eq!(opaque_text(&url), "https://example.org");
    }
}
