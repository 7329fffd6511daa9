//! Node kinds and their traversal behavior.
//!
//! [`NodeKind`] is the closed set of categories a syntax tree node can
//! belong to. Every kind carries a [`Traversal`] behavior telling generic
//! passes whether they may recurse into its children.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// How generic passes treat the children of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Children are recursed into by default.
    Traversable,

    /// Children are opaque payload (raw literals, finalized markers).
    ///
    /// Passes never rewrite inside such a node; it is kept or dropped as a
    /// whole.
    NonTraversable,

    /// Children are recursed into, and the node bounds identifier and tag
    /// visibility. Scopes are retained as outline context by tag filtering.
    Scope,
}

impl Traversal {
    /// Returns `true` if passes may recurse into children of this behavior.
    pub fn is_traversable(&self) -> bool {
        !matches!(self, Traversal::NonTraversable)
    }
}

/// Error returned when a kind name does not match any [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind `{0}`")]
pub struct UnknownKind(pub String);

macro_rules! node_kinds {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, $traversal:ident; )+) => {
        /// The category of a syntax tree node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $( $(#[$doc])* $variant, )+
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$variant, )+ ];

            /// Returns the canonical notation name (e.g. `"LEVEL_TITLE"`).
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( NodeKind::$variant => $name, )+
                }
            }

            /// Returns the traversal behavior of this kind.
            pub const fn traversal(&self) -> Traversal {
                match self {
                    $( NodeKind::$variant => Traversal::$traversal, )+
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(NodeKind::$variant), )+
                    _ => Err(UnknownKind(s.to_string())),
                }
            }
        }
    };
}

node_kinds! {
    /// Root of a document.
    Document => "DOCUMENT", Traversable;
    Paragraph => "PARAGRAPH", Traversable;
    /// Flat section marker, before level construction.
    LevelIntroducer => "LEVEL_INTRODUCER", Traversable;
    /// Run of `=` giving the depth of a [`NodeKind::LevelIntroducer`].
    LevelIntroducerIndent => "LEVEL_INTRODUCER_INDENT", NonTraversable;
    LevelTitle => "LEVEL_TITLE", Traversable;
    /// Nested section produced by level construction.
    Level => "LEVEL", Scope;

    AbsoluteIdentifier => "ABSOLUTE_IDENTIFIER", NonTraversable;
    RelativeIdentifier => "RELATIVE_IDENTIFIER", NonTraversable;
    ExplicitIdentifier => "EXPLICIT_IDENTIFIER", NonTraversable;
    ImplicitIdentifier => "IMPLICIT_IDENTIFIER", NonTraversable;
    CollidingExplicitIdentifier => "COLLIDING_EXPLICIT_IDENTIFIER", NonTraversable;

    /// Raw tag, before classification.
    Tag => "TAG", NonTraversable;
    ExplicitTag => "EXPLICIT_TAG", NonTraversable;
    ImplicitTag => "IMPLICIT_TAG", NonTraversable;
    PromotedTag => "PROMOTED_TAG", NonTraversable;

    Word => "WORD", Traversable;
    Whitespace => "WHITESPACE", Traversable;
    LineBreak => "LINE_BREAK", Traversable;
    ApostropheWordmate => "APOSTROPHE_WORDMATE", Traversable;
    PunctuationSign => "PUNCTUATION_SIGN", Traversable;
    SignComma => "SIGN_COMMA", Traversable;
    SignFullstop => "SIGN_FULLSTOP", Traversable;
    SignEllipsis => "SIGN_ELLIPSIS", Traversable;
    SignQuestionmark => "SIGN_QUESTIONMARK", Traversable;
    SignExclamationmark => "SIGN_EXCLAMATIONMARK", Traversable;
    SignSemicolon => "SIGN_SEMICOLON", Traversable;
    SignColon => "SIGN_COLON", Traversable;

    BlockInsideParenthesis => "BLOCK_INSIDE_PARENTHESIS", Traversable;
    BlockInsideSquareBrackets => "BLOCK_INSIDE_SQUARE_BRACKETS", Traversable;
    BlockInsideDoubleQuotes => "BLOCK_INSIDE_DOUBLE_QUOTES", Traversable;
    BlockInsideSolidusPairs => "BLOCK_INSIDE_SOLIDUS_PAIRS", Traversable;
    BlockInsideHyphenPairs => "BLOCK_INSIDE_HYPHEN_PAIRS", Traversable;

    /// Soft literal: `` `text` ``.
    BlockOfLiteralInsideGraveAccents => "BLOCK_OF_LITERAL_INSIDE_GRAVE_ACCENTS", NonTraversable;
    /// Hard literal: ``` ``text`` ```.
    BlockOfLiteralInsideGraveAccentPairs => "BLOCK_OF_LITERAL_INSIDE_GRAVE_ACCENT_PAIRS", NonTraversable;
    LinesOfLiteral => "LINES_OF_LITERAL", NonTraversable;
    Url => "URL", NonTraversable;

    EmbeddedListItemWithHyphen => "EMBEDDED_LIST_ITEM_WITH_HYPHEN", Traversable;
    EmbeddedListItemNumbered => "EMBEDDED_LIST_ITEM_NUMBERED", Traversable;
    EmbeddedListWithHyphen => "EMBEDDED_LIST_WITH_HYPHEN", Traversable;
    EmbeddedListWithNumberSign => "EMBEDDED_LIST_WITH_NUMBER_SIGN", Traversable;
    EmbeddedListItem => "EMBEDDED_LIST_ITEM", Traversable;

    ZeroWidthSpace => "ZERO_WIDTH_SPACE", NonTraversable;
    PreservedWhitespace => "PRESERVED_WHITESPACE", NonTraversable;
}

impl NodeKind {
    /// Returns `true` for punctuation sign kinds.
    pub const fn is_punctuation(&self) -> bool {
        matches!(
            self,
            NodeKind::PunctuationSign
                | NodeKind::SignComma
                | NodeKind::SignFullstop
                | NodeKind::SignEllipsis
                | NodeKind::SignQuestionmark
                | NodeKind::SignExclamationmark
                | NodeKind::SignSemicolon
                | NodeKind::SignColon
        )
    }

    /// Returns `true` for block-level kinds, the candidates for pruning
    /// during tag filtering.
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Level
                | NodeKind::EmbeddedListWithHyphen
                | NodeKind::EmbeddedListWithNumberSign
        )
    }

    /// Returns `true` for kinds that may carry a resolved identifier.
    pub const fn is_identifier_bearing(&self) -> bool {
        !matches!(self.traversal(), Traversal::NonTraversable)
    }

    /// Returns `true` for the markers written by designator resolution.
    pub const fn is_identifier_marker(&self) -> bool {
        matches!(
            self,
            NodeKind::ExplicitIdentifier
                | NodeKind::ImplicitIdentifier
                | NodeKind::CollidingExplicitIdentifier
        )
    }

    /// Returns `true` for any of the tag kinds.
    pub const fn is_tag(&self) -> bool {
        matches!(
            self,
            NodeKind::Tag | NodeKind::ExplicitTag | NodeKind::ImplicitTag | NodeKind::PromotedTag
        )
    }

    /// Returns `true` for delimited blocks whose delimiters render as `_`
    /// in implicit identifiers.
    pub const fn is_delimited_block(&self) -> bool {
        matches!(
            self,
            NodeKind::BlockInsideParenthesis
                | NodeKind::BlockInsideSquareBrackets
                | NodeKind::BlockInsideDoubleQuotes
                | NodeKind::BlockInsideSolidusPairs
                | NodeKind::BlockInsideHyphenPairs
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
