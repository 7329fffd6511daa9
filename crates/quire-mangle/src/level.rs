//! Level hierarchy construction.
//!
//! The raw tree lists sections flat under the root: a `LEVEL_INTRODUCER`
//! marks where a section of a given depth starts, and everything after it
//! belongs to it until the next introducer of the same or a lower depth.
//! This pass turns that flat sequence into nested `LEVEL` nodes.

use log::{debug, trace};

use quire_core::{Location, Node, NodeKind};

use crate::error::{Diagnostic, ErrorCode, Result};

/// A level under construction. Its node is built once, when it closes.
struct Frame {
    depth: usize,
    node: Node,
    children: Vec<Node>,
}

impl Frame {
    fn close(self) -> Node {
        self.node.adopt(self.children)
    }
}

/// Nest the flat level introducers found under `root`.
///
/// A tree without any introducer is returned as the very same node.
///
/// # Errors
///
/// - `E200` when an introducer is more than one level deeper than the
///   level it would be nested in.
/// - `E201` when an introducer has no valid indent.
pub fn build_levels(root: &Node) -> Result<Node> {
    if !root.has_child_of_kind(NodeKind::LevelIntroducer) {
        trace!("No level introducer");
        return Ok(root.clone());
    }
    debug!(children = root.child_count(); "Building levels");

    let mut stack = vec![Frame {
        depth: 0,
        node: root.clone(),
        children: Vec::with_capacity(root.child_count()),
    }];

    for child in root.children() {
        if child.kind() != NodeKind::LevelIntroducer {
            push_child(&mut stack, child.clone());
            continue;
        }

        let depth = introducer_depth(child)?;
        while stack.last().is_some_and(|frame| frame.depth >= depth) {
            pop_frame(&mut stack);
        }

        let enclosing = stack.last().map_or(0, |frame| frame.depth);
        if depth > enclosing + 1 {
            return Err(Diagnostic::error(format!(
                "level depth jumps from {enclosing} to {depth}"
            ))
            .with_code(ErrorCode::E200)
            .with_label_opt(child.location(), format!("introducer at depth {depth}"))
            .with_help(format!("insert a level of depth {} first", enclosing + 1))
            .into());
        }

        let children = child
            .children()
            .iter()
            .filter(|c| c.kind() != NodeKind::LevelIntroducerIndent)
            .cloned()
            .collect();
        trace!(depth; "Opening level");
        stack.push(Frame {
            depth,
            node: Node::new(NodeKind::Level).with_location_opt(child.location().cloned()),
            children,
        });
    }

    while stack.len() > 1 {
        pop_frame(&mut stack);
    }
    Ok(stack.pop().map(Frame::close).unwrap_or_else(|| root.clone()))
}

fn push_child(stack: &mut [Frame], child: Node) {
    if let Some(frame) = stack.last_mut() {
        frame.children.push(child);
    }
}

/// Close the innermost level and attach it to the one below.
fn pop_frame(stack: &mut Vec<Frame>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(frame) = stack.pop() {
        push_child(stack, frame.close());
    }
}

/// Depth of an introducer: the length of its `=` run, minus one.
fn introducer_depth(introducer: &Node) -> Result<usize> {
    let malformed = |location: Option<&Location>, label: &str| {
        Diagnostic::error("malformed level introducer")
            .with_code(ErrorCode::E201)
            .with_label_opt(location, label.to_string())
            .with_help("a level introducer starts with at least two `=`")
    };

    let indent = introducer
        .children()
        .iter()
        .find(|child| child.kind() == NodeKind::LevelIntroducerIndent)
        .ok_or_else(|| malformed(introducer.location(), "no indent"))?;

    let text = indent.text().unwrap_or_default();
    if text.is_empty() || !text.chars().all(|c| c == '=') {
        let location = indent.location().or(introducer.location());
        return Err(malformed(location, "indent must be a run of `=`").into());
    }

    match text.len() - 1 {
        0 => {
            let location = indent.location().or(introducer.location());
            Err(malformed(location, "a single `=` is not a level").into())
        }
        depth => Ok(depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation;

    fn introducer(depth: usize, title: &str) -> Node {
        Node::new(NodeKind::LevelIntroducer)
            .with_child(Node::new(NodeKind::LevelIntroducerIndent).with_text("=".repeat(depth + 1)))
            .with_child(
                Node::new(NodeKind::LevelTitle)
                    .with_child(Node::new(NodeKind::Word).with_text(title)),
            )
    }

    fn content(text: &str) -> Node {
        Node::new(NodeKind::Paragraph).with_child(Node::new(NodeKind::Word).with_text(text))
    }

    fn document(depths: &[usize]) -> Node {
        let mut root = Node::new(NodeKind::Document);
        for (i, depth) in depths.iter().enumerate() {
            root = root
                .with_child(introducer(*depth, &format!("t{i}")))
                .with_child(content(&format!("c{i}")));
        }
        root
    }

    /// Shape of the levels as nested depth lists, ignoring content.
    fn shape(node: &Node) -> String {
        let inner: Vec<String> = node
            .children()
            .iter()
            .filter(|child| child.kind() == NodeKind::Level)
            .map(shape)
            .collect();
        format!("L[{}]", inner.join(","))
    }

    #[test]
    fn test_nesting() {
        // Arrange
        let root = document(&[1, 2, 3, 2, 1]);

        // Act
        let nested = build_levels(&root).unwrap();

        // Assert
        assert_eq!(nested.child_count(), 2);
        assert_eq!(shape(&nested), "L[L[L[L[]],L[]],L[]]");

        let first = &nested.children()[0];
        assert_eq!(first.children()[0].kind(), NodeKind::LevelTitle);
        assert_eq!(first.children()[1], content("c0"));
        assert_eq!(first.children()[2].kind(), NodeKind::Level);
    }

    #[test]
    fn test_content_before_first_level_stays_at_root() {
        let root = Node::new(NodeKind::Document)
            .with_child(content("preamble"))
            .with_child(introducer(1, "a"))
            .with_child(content("body"));

        let nested = build_levels(&root).unwrap();

        assert_eq!(nested.children()[0], content("preamble"));
        assert_eq!(nested.children()[1].kind(), NodeKind::Level);
        assert_eq!(nested.child_count(), 2);
    }

    #[test]
    fn test_depth_jump_is_rejected() {
        let err = build_levels(&document(&[1, 3])).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));

        let err = build_levels(&document(&[2])).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_malformed_introducers() {
        let no_indent = Node::new(NodeKind::Document).with_child(Node::new(NodeKind::LevelIntroducer));
        let single = Node::new(NodeKind::Document).with_child(introducer(0, "x"));
        let wrong = notation::read(
            r#"(DOCUMENT (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "=*")))"#,
            None,
        )
        .unwrap();

        for root in [no_indent, single, wrong] {
            let err = build_levels(&root).unwrap_err();
            assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E201));
        }
    }

    #[test]
    fn test_error_carries_location() {
        let root = notation::read(
            "(DOCUMENT\n  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT \"====\")))",
            Some("jump.quire"),
        )
        .unwrap();

        let err = build_levels(&root).unwrap_err();

        let location = err.diagnostics()[0].primary_location().unwrap();
        assert_eq!(location.to_string(), "jump.quire:2:3");
    }

    #[test]
    fn test_long_level_shares_its_content() {
        let paragraphs: Vec<Node> = (0..20_000).map(|i| content(&format!("p{i}"))).collect();
        let root = Node::new(NodeKind::Document)
            .with_child(introducer(1, "long"))
            .with_children(paragraphs.iter().cloned());

        let nested = build_levels(&root).unwrap();

        assert_eq!(nested.child_count(), 1);
        let level = &nested.children()[0];
        assert_eq!(level.child_count(), paragraphs.len() + 1);
        for (kept, original) in level.children()[1..].iter().zip(&paragraphs) {
            assert!(Node::ptr_eq(kept, original));
        }
    }

    #[test]
    fn test_no_introducer_is_identity() {
        let root = Node::new(NodeKind::Document).with_child(content("only"));
        let result = build_levels(&root).unwrap();
        assert!(Node::ptr_eq(&result, &root));
    }
}
