//! Separator normalization.
//!
//! Three rewrites run in order, each skipping non-traversable subtrees:
//! apostrophes bordered by spaces get a `PRESERVED_WHITESPACE` marker,
//! whitespace runs are stripped, and adjacent literals of the same family
//! are split by a `ZERO_WIDTH_SPACE`.

use log::{debug, trace};

use quire_core::{Node, NodeKind, fold::Fold};

/// Normalize the separators of `root`.
///
/// Normalizing an already normalized tree gives the very same tree.
pub fn normalize(root: &Node, strip_whitespace: bool) -> Node {
    debug!(strip_whitespace; "Normalizing separators");

    let mut apostrophes = Apostrophes::default();
    let mut tree = apostrophes.fold_node(root);

    let mut stripped = 0;
    if strip_whitespace {
        let mut stripper = WhitespaceStripper::default();
        tree = stripper.fold_node(&tree);
        stripped = stripper.removed;
    }

    let mut literals = LiteralSeparators::default();
    tree = literals.fold_node(&tree);

    trace!(
        preserved = apostrophes.inserted,
        stripped,
        zero_width = literals.inserted;
        "Separators normalized"
    );
    tree
}

fn is_whitespace(node: &Node) -> bool {
    matches!(node.kind(), NodeKind::Whitespace | NodeKind::LineBreak)
}

/// Returns `true` when `nodes` starts with a non-empty run of spaces
/// followed by a word. A line break ends the run.
fn whitespace_then_word<'a>(mut nodes: impl Iterator<Item = &'a Node>) -> bool {
    let mut run = 0;
    for node in nodes.by_ref() {
        if node.kind() == NodeKind::Whitespace {
            run += 1;
        } else {
            return run > 0 && node.kind() == NodeKind::Word;
        }
    }
    false
}

fn marker(kind: NodeKind, near: &Node) -> Node {
    Node::new(kind).with_location_opt(near.location().cloned())
}

/// Marks the spaces around an apostrophe that must survive.
#[derive(Default)]
struct Apostrophes {
    inserted: usize,
}

impl Fold for Apostrophes {
    fn fold_children(&mut self, _parent: &Node, children: &[Node]) -> Vec<Node> {
        let folded: Vec<Node> = children.iter().map(|child| self.fold_node(child)).collect();
        let mut out = Vec::with_capacity(folded.len());

        for (index, child) in folded.iter().enumerate() {
            let apostrophe = child.kind() == NodeKind::ApostropheWordmate;
            if apostrophe && whitespace_then_word(folded[..index].iter().rev()) {
                out.push(marker(NodeKind::PreservedWhitespace, child));
                self.inserted += 1;
            }
            out.push(child.clone());
            if apostrophe && whitespace_then_word(folded[index + 1..].iter()) {
                out.push(marker(NodeKind::PreservedWhitespace, child));
                self.inserted += 1;
            }
        }
        out
    }
}

#[derive(Default)]
struct WhitespaceStripper {
    removed: usize,
}

impl Fold for WhitespaceStripper {
    fn fold_children(&mut self, _parent: &Node, children: &[Node]) -> Vec<Node> {
        let before = children.len();
        let out: Vec<Node> = children
            .iter()
            .filter(|child| !is_whitespace(child))
            .map(|child| self.fold_node(child))
            .collect();
        self.removed += before - out.len();
        out
    }
}

/// Separates adjacent literals of the same family.
#[derive(Default)]
struct LiteralSeparators {
    inserted: usize,
}

impl Fold for LiteralSeparators {
    fn fold_children(&mut self, _parent: &Node, children: &[Node]) -> Vec<Node> {
        let mut out: Vec<Node> = Vec::with_capacity(children.len());
        for child in children {
            let folded = self.fold_node(child);
            let same_family = out.last().is_some_and(|previous| {
                previous.kind() == folded.kind()
                    && matches!(
                        folded.kind(),
                        NodeKind::BlockOfLiteralInsideGraveAccents
                            | NodeKind::BlockOfLiteralInsideGraveAccentPairs
                    )
            });
            if same_family {
                out.push(marker(NodeKind::ZeroWidthSpace, &folded));
                self.inserted += 1;
            }
            out.push(folded);
        }
        out
    }
}
