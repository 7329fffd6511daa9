//! Reader and writer for the tree notation.
//!
//! Raw trees are exchanged as s-expressions:
//!
//! ```text
//! ; a comment runs to the end of the line
//! (DOCUMENT
//!   (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (LEVEL_TITLE (WORD "Intro")))
//!   (PARAGRAPH (WORD "Hello") (WHITESPACE " ") (WORD "world")))
//! ```
//!
//! A node is an opening parenthesis, a kind name, an optional quoted text
//! and child nodes. Texts support the escapes `\"`, `\\`, `\n`, `\t` and
//! `\u{XXXX}`. Every node read gets the location of its opening
//! parenthesis.

use std::sync::Arc;

use log::{debug, trace};
use winnow::{
    Parser as _,
    ascii::multispace1,
    combinator::{alt, delimited, preceded, repeat},
    error::{ContextError, ErrMode},
    token::{any, take_while},
};

use quire_core::{Location, Node, NodeKind};

use crate::error::{Diagnostic, ErrorCode, Result};

/// Deepest node nesting accepted by [`read`], the root being at depth 1.
pub const MAX_DEPTH: usize = 256;

/// Diagnostic context attached to notation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NotationDiagnostic {
    code: ErrorCode,
    message: String,
    label: &'static str,
    help: Option<&'static str>,
    /// Remaining input length where the offending construct starts.
    remaining: usize,
}

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<NotationDiagnostic>>>;

fn cut(diagnostic: NotationDiagnostic) -> ErrMode<ContextError<NotationDiagnostic>> {
    let mut e = ContextError::new();
    e.push(diagnostic);
    ErrMode::Cut(e)
}

/// Parse a `;` comment up to the end of the line.
fn comment(input: &mut Input<'_>) -> IResult<()> {
    preceded(';', take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

/// Parse zero or more whitespace runs and comments.
fn trivia(input: &mut Input<'_>) -> IResult<()> {
    repeat(0.., alt((multispace1.void(), comment))).parse_next(input)
}

fn open_paren(input: &mut Input<'_>) -> IResult<()> {
    '('.void().parse_next(input)
}

fn close_paren(input: &mut Input<'_>) -> IResult<()> {
    ')'.void().parse_next(input)
}

fn next_char(input: &mut Input<'_>) -> Option<char> {
    any::<_, ErrMode<ContextError<NotationDiagnostic>>>
        .parse_next(input)
        .ok()
}

/// Parse a kind name such as `LEVEL_TITLE`.
fn kind(input: &mut Input<'_>) -> IResult<NodeKind> {
    let start = input.len();
    let name = take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .parse_next(input)
        .map_err(|_: ErrMode<ContextError<NotationDiagnostic>>| {
            cut(NotationDiagnostic {
                code: ErrorCode::E002,
                message: "expected a node kind".to_string(),
                label: "kind name expected here",
                help: Some("a node starts with `(` followed by a kind such as `PARAGRAPH`"),
                remaining: start,
            })
        })?;

    name.parse::<NodeKind>().map_err(|err| {
        cut(NotationDiagnostic {
            code: ErrorCode::E004,
            message: err.to_string(),
            label: "not a node kind",
            help: None,
            remaining: start,
        })
    })
}

/// Parse the part of an escape sequence after the backslash.
fn escape(input: &mut Input<'_>, escape_start: usize) -> IResult<char> {
    let simple = alt(('"'.value('"'), '\\'.value('\\'), 'n'.value('\n'), 't'.value('\t')));
    let unicode = preceded(
        'u',
        delimited('{', take_while(1..=6, |c: char| c.is_ascii_hexdigit()), '}'),
    )
    .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32));

    alt((simple, unicode))
        .parse_next(input)
        .map_err(|_: ErrMode<ContextError<NotationDiagnostic>>| {
            cut(NotationDiagnostic {
                code: ErrorCode::E003,
                message: "invalid escape sequence".to_string(),
                label: ErrorCode::E003.description(),
                help: Some("valid escapes: `\\\"`, `\\\\`, `\\n`, `\\t`, `\\u{XXXX}`"),
                remaining: escape_start,
            })
        })
}

/// Parse a double-quoted node text.
fn text(input: &mut Input<'_>) -> IResult<String> {
    let start = input.len();
    let mut out = String::new();

    // Opening quote, checked by the caller.
    next_char(input);

    loop {
        let char_start = input.len();
        match next_char(input) {
            None => {
                return Err(cut(NotationDiagnostic {
                    code: ErrorCode::E001,
                    message: "unterminated string".to_string(),
                    label: "string starts here",
                    help: Some("add closing `\"`"),
                    remaining: start,
                }));
            }
            Some('"') => return Ok(out),
            Some('\\') => out.push(escape(input, char_start)?),
            Some(c) => out.push(c),
        }
    }
}

/// Parse one node, at `depth`, and its children.
fn node(input: &mut Input<'_>, lines: &LineIndex<'_>, depth: usize) -> IResult<Node> {
    let start = input.len();
    if depth > MAX_DEPTH {
        return Err(cut(NotationDiagnostic {
            code: ErrorCode::E007,
            message: format!("nodes nested deeper than {MAX_DEPTH} levels"),
            label: ErrorCode::E007.description(),
            help: Some("flatten the tree"),
            remaining: start,
        }));
    }
    open_paren(input)?;
    trivia(input)?;
    let kind = kind(input)?;
    let mut node = Node::new(kind).with_location(lines.location(start));

    trivia(input)?;
    if input.starts_with('"') {
        node = node.with_text(text(input)?);
    }

    loop {
        trivia(input)?;
        match input.chars().next() {
            Some(')') => {
                close_paren(input)?;
                return Ok(node);
            }
            Some('(') => {
                let child = self::node(input, lines, depth + 1)?;
                node = node.with_child(child);
            }
            Some('"') => {
                return Err(cut(NotationDiagnostic {
                    code: ErrorCode::E002,
                    message: "unexpected text".to_string(),
                    label: "text must come right after the kind",
                    help: Some("a node has at most one text, written before its children"),
                    remaining: input.len(),
                }));
            }
            Some(_) => {
                return Err(cut(NotationDiagnostic {
                    code: ErrorCode::E002,
                    message: "unexpected character".to_string(),
                    label: ErrorCode::E002.description(),
                    help: Some("expected a child node or `)`"),
                    remaining: input.len(),
                }));
            }
            None => {
                return Err(cut(NotationDiagnostic {
                    code: ErrorCode::E005,
                    message: format!("unclosed `{kind}` node"),
                    label: "this node is never closed",
                    help: Some("add the missing `)`"),
                    remaining: start,
                }));
            }
        }
    }
}

/// Parse a whole document: exactly one root node, surrounded by trivia.
fn document(input: &mut Input<'_>, lines: &LineIndex<'_>) -> IResult<Node> {
    trivia(input)?;
    match input.chars().next() {
        Some('(') => {}
        Some(_) => {
            return Err(cut(NotationDiagnostic {
                code: ErrorCode::E002,
                message: "unexpected character".to_string(),
                label: "expected `(`",
                help: None,
                remaining: input.len(),
            }));
        }
        None => {
            return Err(cut(NotationDiagnostic {
                code: ErrorCode::E005,
                message: "no root node".to_string(),
                label: "input ends here",
                help: Some("a document is a single node such as `(DOCUMENT)`"),
                remaining: input.len(),
            }));
        }
    }

    let root = node(input, lines, 1)?;
    trivia(input)?;
    if !input.is_empty() {
        return Err(cut(NotationDiagnostic {
            code: ErrorCode::E006,
            message: "trailing input after the root node".to_string(),
            label: "unexpected input",
            help: Some("wrap every node in the single root node"),
            remaining: input.len(),
        }));
    }
    Ok(root)
}

/// Maps remaining-input lengths back to line and column.
struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
    source_name: Option<Arc<str>>,
}

impl<'src> LineIndex<'src> {
    fn new(source: &'src str, source_name: Option<&str>) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
            source_name: source_name.map(Arc::from),
        }
    }

    fn location(&self, remaining: usize) -> Location {
        let offset = self.source.len() - remaining;
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;

        let location = Location::new(line, column);
        match &self.source_name {
            Some(name) => location.with_source_name(Arc::clone(name)),
            None => location,
        }
    }

    fn diagnostic(
        &self,
        err: ErrMode<ContextError<NotationDiagnostic>>,
        error_remaining: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            _ => ContextError::new(),
        };

        if let Some(ctx) = context_error.context().next() {
            let mut diag = Diagnostic::error(ctx.message.clone())
                .with_code(ctx.code)
                .with_label(self.location(ctx.remaining), ctx.label);
            if let Some(help) = ctx.help {
                diag = diag.with_help(help);
            }
            return diag;
        }

        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(self.location(error_remaining), ErrorCode::E002.description())
    }
}

/// Read a tree from its notation.
///
/// `source_name` is attached to every node location.
///
/// # Errors
///
/// Returns a [`MangleError`](crate::error::MangleError) with a single
/// diagnostic (codes `E001` to `E007`) for malformed input.
///
/// # Example
///
/// ```
/// use quire_core::NodeKind;
/// use quire_mangle::notation;
///
/// let root = notation::read(r#"(DOCUMENT (PARAGRAPH (WORD "hi")))"#, Some("hi.quire")).unwrap();
/// assert_eq!(root.kind(), NodeKind::Document);
/// assert_eq!(root.children()[0].location().unwrap().to_string(), "hi.quire:1:11");
/// ```
pub fn read(source: &str, source_name: Option<&str>) -> Result<Node> {
    debug!(source_name:?, bytes = source.len(); "Reading tree notation");
    let lines = LineIndex::new(source, source_name);
    let mut input = source;

    match document(&mut input, &lines) {
        Ok(root) => {
            trace!(nodes = root.subtree_size(); "Tree notation read");
            Ok(root)
        }
        Err(err) => Err(lines.diagnostic(err, input.len()).into()),
    }
}

/// Write a tree in the indented notation, with a trailing newline.
pub fn write(node: &Node) -> String {
    format!("{node:#}\n")
}
