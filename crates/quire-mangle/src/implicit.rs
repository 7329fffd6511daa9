//! Implicit identifiers derived from title text.
//!
//! A level without an explicit identifier is still addressable through an
//! identifier computed from its title: `Hello, world (again)` becomes
//! `Hello_world_again`. The same identifier, split on `_`, gives the implicit
//! tags of the level.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use quire_core::{Node, NodeKind, walk::opaque_text};

static SIGNS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[,.;?!:]+").expect("valid regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(" +").expect("valid regex"));
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new("-+").expect("valid regex"));
static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new("_+").expect("valid regex"));
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9a-zA-Z]+").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9a-zA-Z_-]+").expect("valid regex"));
/// A word preceded by a space; the space is part of the match.
static WORD_BUT_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" ([0-9a-zA-Z]+(?:-[0-9a-zA-Z]+)*)").expect("valid regex"));

/// Derive the implicit identifier of a title.
///
/// Returns an empty string when the title has no usable character.
///
/// # Example
///
/// ```
/// use quire_core::{Node, NodeKind};
/// use quire_mangle::implicit::implicit_identifier;
///
/// let word = |text: &str| Node::new(NodeKind::Word).with_text(text);
/// let title = Node::new(NodeKind::LevelTitle).with_children([
///     word("Hello"),
///     Node::new(NodeKind::SignComma).with_text(","),
///     Node::new(NodeKind::Whitespace).with_text(" "),
///     word("world"),
/// ]);
/// assert_eq!(implicit_identifier(&title), "Hello_world");
/// ```
pub fn implicit_identifier(title: &Node) -> String {
    let mut textualizer = Textualizer::default();
    textualizer.node(title);
    clean(&textualizer.out)
}

/// Split an implicit identifier into its tag names.
pub fn implicit_tag_names(identifier: &str) -> Vec<&str> {
    identifier.split('_').filter(|part| !part.is_empty()).collect()
}

/// Renders a title to plain text with delimiters replaced by `_`.
#[derive(Default)]
struct Textualizer {
    out: String,
    after_word: bool,
}

impl Textualizer {
    fn node(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Word => {
                // Adjacent words are still separate words.
                if self.after_word {
                    self.out.push(' ');
                }
                self.out.push_str(node.text().unwrap_or_default());
                self.after_word = true;
            }
            NodeKind::Whitespace | NodeKind::LineBreak | NodeKind::PreservedWhitespace => {
                self.out.push(' ');
                self.after_word = false;
            }
            kind if kind.is_delimited_block() => {
                self.out.push('_');
                self.after_word = false;
                self.children(node);
                self.out.push('_');
                self.after_word = false;
            }
            NodeKind::BlockOfLiteralInsideGraveAccents
            | NodeKind::BlockOfLiteralInsideGraveAccentPairs
            | NodeKind::LinesOfLiteral
            | NodeKind::Url => {
                let literal = opaque_text(node);
                self.out
                    .push_str(&NON_ALPHANUMERIC.replace_all(&literal, "-"));
                self.after_word = false;
            }
            kind if kind.is_tag() => {}
            NodeKind::AbsoluteIdentifier
            | NodeKind::RelativeIdentifier
            | NodeKind::ExplicitIdentifier
            | NodeKind::ImplicitIdentifier
            | NodeKind::CollidingExplicitIdentifier
            | NodeKind::ZeroWidthSpace
            | NodeKind::LevelIntroducerIndent => {}
            _ => {
                if let Some(text) = node.text() {
                    self.out.push_str(text);
                    self.after_word = false;
                }
                self.children(node);
            }
        }
    }

    fn children(&mut self, node: &Node) {
        for child in node.children() {
            self.node(child);
        }
    }
}

fn clean(text: &str) -> String {
    let s = SIGNS.replace_all(text, "_");
    let s = strip_diacritics(&s);

    let s = collapse(&s);
    let s = s.replace(" _", "_").replace("_ ", "_");

    let s = WORD_BUT_FIRST.replace_all(&s, |caps: &Captures<'_>| upper_first(&caps[1]));

    let s = s
        .trim_start_matches('-')
        .trim_start_matches('_')
        .trim_end_matches('-')
        .trim_end_matches('_');

    let s = collapse(s);
    let s = s.replace("-_", "_").replace("_-", "_");

    DISALLOWED.replace_all(&s, "").into_owned()
}

fn collapse(s: &str) -> String {
    let s = SPACES.replace_all(s, " ");
    let s = HYPHENS.replace_all(&s, "-");
    UNDERSCORES.replace_all(&s, "_").into_owned()
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_diacritics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => out.push('A'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => out.push('I'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => out.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => out.push('O'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'Ù' | 'Ú' | 'Û' | 'Ü' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' => out.push('Y'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'ß' => out.push_str("ss"),
            c => out.push(c),
        }
    }
    out
}
