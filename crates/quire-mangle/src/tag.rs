//! Tag classification and filtering.
//!
//! Classification turns raw `TAG` nodes into `EXPLICIT_TAG`, gives untagged
//! titled levels `IMPLICIT_TAG`s derived from their title, and promotes the
//! implicit tags somebody actually refers to. Filtering keeps the parts of
//! a document carrying selected tags, plus the levels around them as
//! outline context.

use log::{debug, trace};

use quire_core::{
    Node, NodeKind, Traversal,
    fold::{Fold, fold_descendants},
    tag::{Tag, TagSet},
};

use crate::implicit::{implicit_identifier, implicit_tag_names};

/// Classify raw and implicit tags.
///
/// Raw `TAG` nodes become `EXPLICIT_TAG`. A `LEVEL` with a title and no tag
/// at all receives one `IMPLICIT_TAG` per part of its implicit identifier,
/// at the front of its children.
pub fn classify(root: &Node) -> Node {
    debug!("Classifying tags");
    Classifier.fold_node(root)
}

/// Rewrite every `IMPLICIT_TAG` whose name is in `promoted` as a
/// `PROMOTED_TAG`.
pub fn promote(root: &Node, promoted: &TagSet) -> Node {
    if promoted.is_empty() {
        return root.clone();
    }
    debug!(promoted = promoted.len(); "Promoting implicit tags");
    Promoter { promoted }.fold_node(root)
}

/// Collect the explicit tags of a document, raw or classified.
pub fn explicit_tags(root: &Node) -> TagSet {
    let mut tags = TagSet::new();
    collect_explicit(root, &mut tags);
    tags
}

fn collect_explicit(node: &Node, tags: &mut TagSet) {
    if matches!(node.kind(), NodeKind::Tag | NodeKind::ExplicitTag) {
        if let Some(tag) = tag_of(node) {
            tags.insert(tag);
        }
        return;
    }
    if !node.kind().traversal().is_traversable() {
        return;
    }
    for child in node.children() {
        collect_explicit(child, tags);
    }
}

/// Prune `root` down to the parts tagged with one of `filter`.
///
/// Block nodes (paragraphs, levels, lists) are kept when they carry a
/// matching tag, together with their whole content, or when they enclose
/// such a node. Other children of a kept node are kept as they are. The
/// root is never dropped, and an empty filter returns the very same tree.
pub fn filter(root: &Node, filter: &TagSet) -> Node {
    if filter.is_empty() {
        return root.clone();
    }
    debug!(tags = filter.len(); "Filtering by tags");

    let (children, matched) = prune_children(root, filter);
    trace!(matched; "Tag filter applied");
    root.adopt_if_changed(children)
}

/// The tag named by a tag node.
fn tag_of(node: &Node) -> Option<Tag> {
    node.text().and_then(|text| Tag::new(text).ok())
}

fn is_tagged(node: &Node, filter: &TagSet) -> bool {
    node.children().iter().any(|child| {
        child.kind().is_tag() && tag_of(child).is_some_and(|tag| filter.contains(&tag))
    })
}

/// Keep `node` whole if tagged, rebuilt if it encloses a match, or drop it.
fn prune(node: &Node, filter: &TagSet) -> Option<Node> {
    if is_tagged(node, filter) {
        return Some(node.clone());
    }
    if node.kind().traversal() == Traversal::NonTraversable {
        return None;
    }
    let (children, matched) = prune_children(node, filter);
    matched.then(|| node.adopt_if_changed(children))
}

/// Prune the block children of `node`; returns the remaining children and
/// whether any block survived.
fn prune_children(node: &Node, filter: &TagSet) -> (Vec<Node>, bool) {
    let mut matched = false;
    let mut children = Vec::with_capacity(node.child_count());
    for child in node.children() {
        if !child.kind().is_block() {
            children.push(child.clone());
            continue;
        }
        if let Some(kept) = prune(child, filter) {
            matched = true;
            children.push(kept);
        }
    }
    (children, matched)
}

struct Classifier;

impl Fold for Classifier {
    fn fold_node(&mut self, node: &Node) -> Node {
        match node.kind() {
            NodeKind::Tag => node.clone().with_kind(NodeKind::ExplicitTag),
            NodeKind::Level => {
                let level = fold_descendants(self, node);
                with_implicit_tags(level)
            }
            _ => fold_descendants(self, node),
        }
    }
}

fn with_implicit_tags(level: Node) -> Node {
    if level.children().iter().any(|child| child.kind().is_tag()) {
        return level;
    }
    let Some(title) = level
        .children()
        .iter()
        .find(|child| child.kind() == NodeKind::LevelTitle)
    else {
        return level;
    };

    let identifier = implicit_identifier(title);
    let tags: Vec<Node> = implicit_tag_names(&identifier)
        .into_iter()
        .filter(|name| Tag::new(name).is_ok())
        .map(|name| {
            Node::new(NodeKind::ImplicitTag)
                .with_text(name)
                .with_location_opt(title.location().cloned())
        })
        .collect();
    if tags.is_empty() {
        return level;
    }

    trace!(tags = tags.len(); "Adding implicit tags");
    let mut children = tags;
    children.extend(level.children().iter().cloned());
    level.adopt(children)
}

struct Promoter<'a> {
    promoted: &'a TagSet,
}

impl Fold for Promoter<'_> {
    fn fold_node(&mut self, node: &Node) -> Node {
        if node.kind() == NodeKind::ImplicitTag {
            return match tag_of(node) {
                Some(tag) if self.promoted.contains(&tag) => {
                    node.clone().with_kind(NodeKind::PromotedTag)
                }
                _ => node.clone(),
            };
        }
        fold_descendants(self, node)
    }
}

#[cfg(test)]
mod tests {
    use quire_core::tag::tag_set;

    use super::*;
    use crate::notation;

    fn read(source: &str) -> Node {
        notation::read(source, None).unwrap()
    }

    #[test]
    fn test_classify_raw_tags() {
        let root = read(r#"(DOCUMENT (PARAGRAPH (TAG "draft") (WORD "x")))"#);

        let classified = classify(&root);

        assert_eq!(
            classified,
            read(r#"(DOCUMENT (PARAGRAPH (EXPLICIT_TAG "draft") (WORD "x")))"#)
        );
    }

    #[test]
    fn test_classify_adds_implicit_tags() {
        let root = read(
            r#"(DOCUMENT
                 (LEVEL (LEVEL_TITLE (WORD "Hello") (SIGN_COMMA ",") (WHITESPACE " ") (WORD "world")))
                 (LEVEL (TAG "mine") (LEVEL_TITLE (WORD "Skipped"))))"#,
        );

        let classified = classify(&root);

        let first = &classified.children()[0];
        let tags: Vec<_> = first
            .children()
            .iter()
            .filter(|c| c.kind() == NodeKind::ImplicitTag)
            .filter_map(Node::text)
            .collect();
        assert_eq!(tags, ["Hello", "world"]);
        assert_eq!(first.children()[2].kind(), NodeKind::LevelTitle);

        let second = &classified.children()[1];
        assert!(!second.has_child_of_kind(NodeKind::ImplicitTag));
        assert!(second.has_child_of_kind(NodeKind::ExplicitTag));
    }

    #[test]
    fn test_classify_is_stable() {
        let root = read(r#"(DOCUMENT (LEVEL (LEVEL_TITLE (WORD "Intro"))))"#);

        let once = classify(&root);
        let twice = classify(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_promote() {
        let root = read(
            r#"(DOCUMENT (LEVEL (IMPLICIT_TAG "Intro") (IMPLICIT_TAG "Other") (LEVEL_TITLE)))"#,
        );

        let promoted = promote(&root, &tag_set(["Intro"]).unwrap());

        let kinds: Vec<_> = promoted.children()[0].children().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            [NodeKind::PromotedTag, NodeKind::ImplicitTag, NodeKind::LevelTitle]
        );
    }

    #[test]
    fn test_explicit_tags() {
        let root = read(
            r#"(DOCUMENT
                 (PARAGRAPH (TAG "b") (WORD "x"))
                 (LEVEL (EXPLICIT_TAG "a") (IMPLICIT_TAG "c") (PARAGRAPH (TAG "b")))
                 (LINES_OF_LITERAL (TAG "hidden")))"#,
        );

        let names: Vec<_> = explicit_tags(&root).iter().map(Tag::name).collect();

        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_filter_keeps_tagged_paragraph_in_level() {
        // Arrange
        let root = read(
            r#"(DOCUMENT (LEVEL
                 (LEVEL_TITLE (WORD "T"))
                 (PARAGRAPH (EXPLICIT_TAG "x") (WORD "keep"))
                 (PARAGRAPH (WORD "drop"))))"#,
        );

        // Act
        let filtered = filter(&root, &tag_set(["x"]).unwrap());

        // Assert
        assert_eq!(
            filtered,
            read(
                r#"(DOCUMENT (LEVEL
                     (LEVEL_TITLE (WORD "T"))
                     (PARAGRAPH (EXPLICIT_TAG "x") (WORD "keep"))))"#
            )
        );
    }

    #[test]
    fn test_filter_drops_unmatched_level() {
        let root = read(
            r#"(DOCUMENT (LEVEL (PARAGRAPH (EXPLICIT_TAG "x")) (PARAGRAPH)))"#,
        );

        let filtered = filter(&root, &tag_set(["y"]).unwrap());

        assert_eq!(filtered, read("(DOCUMENT)"));
    }

    #[test]
    fn test_filter_keeps_tagged_level_whole() {
        let root = read(
            r#"(DOCUMENT
                 (LEVEL (PROMOTED_TAG "Intro") (PARAGRAPH (WORD "a")) (PARAGRAPH (WORD "b")))
                 (PARAGRAPH (WORD "c")))"#,
        );

        let filtered = filter(&root, &tag_set(["Intro"]).unwrap());

        assert_eq!(filtered.child_count(), 1);
        assert!(Node::ptr_eq(&filtered.children()[0], &root.children()[0]));
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let root = read(r#"(DOCUMENT (PARAGRAPH (WORD "a")))"#);
        let filtered = filter(&root, &TagSet::new());
        assert!(Node::ptr_eq(&filtered, &root));
    }
}
