//! Plain text backend.
//!
//! Renders a mangled tree as readable text: level titles prefixed with their
//! `=` run, paragraphs separated by a blank line, list items on their own
//! lines. Inter-word spacing is re-created here, so the tree may have had
//! its whitespace stripped.

use log::{debug, trace};

use quire_core::{
    Node, NodeKind, TreePath,
    walk::{Walker, walk},
};

use super::{Error, Exporter};

/// Renders trees as plain text.
#[derive(Debug, Default)]
pub struct TextExporter {
    out: String,
    /// A word-like token was written and the next one needs a space.
    pending_space: bool,
}

impl Exporter for TextExporter {
    fn export_tree(&mut self, tree: &Node) -> Result<String, Error> {
        debug!(nodes = tree.subtree_size(); "Rendering plain text");
        self.out.clear();
        self.pending_space = false;

        walk(tree, self)?;

        let mut text = self.out.trim_end().to_string();
        if !text.is_empty() {
            text.push('\n');
        }
        trace!(bytes = text.len(); "Plain text rendered");
        Ok(text)
    }
}

impl TextExporter {
    fn trim_spaces(&mut self) {
        let trimmed = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed);
    }

    /// Start a block, separated from the previous one by a blank line.
    fn start_block(&mut self) {
        self.pending_space = false;
        if self.out.is_empty() {
            return;
        }
        self.trim_spaces();
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn start_line(&mut self) {
        self.pending_space = false;
        if self.out.is_empty() || self.out.ends_with('\n') {
            return;
        }
        self.trim_spaces();
        self.out.push('\n');
    }

    fn space(&mut self) {
        self.pending_space = false;
        if !self.out.is_empty() && !self.out.ends_with([' ', '\n']) {
            self.out.push(' ');
        }
    }

    fn word(&mut self, text: &str) {
        if self.pending_space {
            self.space();
        }
        self.out.push_str(text);
        self.pending_space = true;
    }

    fn open(&mut self, delimiter: &str) {
        if self.pending_space {
            self.space();
        }
        self.out.push_str(delimiter);
        self.pending_space = false;
    }

    fn close(&mut self, delimiter: &str) {
        self.out.push_str(delimiter);
        self.pending_space = true;
    }
}

/// Opening and closing delimiters written around a node kind.
fn delimiters(kind: NodeKind) -> Option<(&'static str, &'static str)> {
    match kind {
        NodeKind::BlockInsideParenthesis => Some(("(", ")")),
        NodeKind::BlockInsideSquareBrackets => Some(("[", "]")),
        NodeKind::BlockInsideDoubleQuotes => Some(("\"", "\"")),
        NodeKind::BlockInsideSolidusPairs => Some(("//", "//")),
        NodeKind::BlockInsideHyphenPairs => Some(("--", "--")),
        NodeKind::BlockOfLiteralInsideGraveAccents => Some(("`", "`")),
        NodeKind::BlockOfLiteralInsideGraveAccentPairs => Some(("``", "``")),
        _ => None,
    }
}

/// Number of levels enclosing the end of `path`, itself included.
fn level_depth(path: &TreePath) -> usize {
    (0..=path.depth())
        .filter_map(|depth| path.at(depth))
        .filter(|node| node.kind() == NodeKind::Level)
        .count()
}

impl Walker for TextExporter {
    type Error = Error;

    fn enter(&mut self, path: &TreePath) -> Result<(), Error> {
        let kind = path.end().kind();
        match kind {
            NodeKind::LevelIntroducer
            | NodeKind::EmbeddedListItemWithHyphen
            | NodeKind::EmbeddedListItemNumbered => return Err(Error::Unmangled(kind)),
            NodeKind::Paragraph | NodeKind::LinesOfLiteral => self.start_block(),
            NodeKind::LevelTitle => {
                self.start_block();
                let depth = level_depth(path);
                self.out.push_str(&"=".repeat(depth + 1));
                self.out.push(' ');
            }
            NodeKind::EmbeddedListWithHyphen | NodeKind::EmbeddedListWithNumberSign => {
                self.start_line();
            }
            NodeKind::EmbeddedListItem => {
                self.start_line();
                let numbered = path
                    .parent()
                    .is_some_and(|list| list.end().kind() == NodeKind::EmbeddedListWithNumberSign);
                if numbered {
                    let number = path.index_in_parent().unwrap_or_default() + 1;
                    self.out.push_str(&format!("{number}. "));
                } else {
                    self.out.push_str("- ");
                }
            }
            NodeKind::PreservedWhitespace => self.space(),
            NodeKind::ZeroWidthSpace => self.pending_space = false,
            _ => {
                if let Some((open, _)) = delimiters(kind) {
                    self.open(open);
                }
            }
        }
        Ok(())
    }

    fn text(&mut self, path: &TreePath, text: &str) -> Result<(), Error> {
        match path.end().kind() {
            NodeKind::Word | NodeKind::Url => self.word(text),
            NodeKind::BlockOfLiteralInsideGraveAccents
            | NodeKind::BlockOfLiteralInsideGraveAccentPairs => self.out.push_str(text),
            NodeKind::LinesOfLiteral => {
                self.out.push_str(text);
                self.pending_space = false;
            }
            NodeKind::ApostropheWordmate => {
                self.out.push_str(text);
                self.pending_space = false;
            }
            kind if kind.is_punctuation() => {
                self.out.push_str(text);
                self.pending_space = true;
            }
            NodeKind::Whitespace | NodeKind::LineBreak => self.space(),
            // Tags, identifiers, list item marks.
            _ => {}
        }
        Ok(())
    }

    fn exit(&mut self, path: &TreePath) -> Result<(), Error> {
        let kind = path.end().kind();
        match kind {
            NodeKind::LevelTitle | NodeKind::Paragraph => self.pending_space = false,
            _ => {
                if let Some((_, close)) = delimiters(kind) {
                    self.close(close);
                }
            }
        }
        Ok(())
    }
}
