use quire_core::{Node, NodeKind, identifier::FragmentIdentifier, tag::tag_set};
use quire_mangle::{ErrorCode, MangleOptions, mangle, notation};

fn read(source: &str) -> Node {
    notation::read(source, Some("test.quire")).expect("Failed to read notation")
}

fn id(text: &str) -> FragmentIdentifier {
    text.parse().expect("valid identifier")
}

const BOOK: &str = r#"
(DOCUMENT
  (PARAGRAPH (WORD "Preamble"))
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (ABSOLUTE_IDENTIFIER "book")
    (LEVEL_TITLE (WORD "The") (WHITESPACE " ") (WORD "Book")))
  (PARAGRAPH (TAG "draft") (WORD "Opening") (WHITESPACE " ") (WORD "words"))
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "===") (RELATIVE_IDENTIFIER "intro")
    (LEVEL_TITLE (WORD "Introduction")))
  (PARAGRAPH
    (EMBEDDED_LIST_ITEM_WITH_HYPHEN (WORD "one"))
    (LINE_BREAK "\n")
    (EMBEDDED_LIST_ITEM_WITH_HYPHEN (WORD "two")))
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "===") (LEVEL_TITLE (WORD "Usage")))
  (PARAGRAPH
    (BLOCK_OF_LITERAL_INSIDE_GRAVE_ACCENTS "cargo")
    (BLOCK_OF_LITERAL_INSIDE_GRAVE_ACCENTS "run")))
"#;

#[test]
fn test_full_pipeline_shapes_document() {
    let mangled = mangle(&read(BOOK), &MangleOptions::default()).expect("Failed to mangle");
    let tree = &mangled.tree;

    assert!(mangled.diagnostics.is_empty());
    assert_eq!(tree.kind(), NodeKind::Document);
    assert_eq!(tree.child_count(), 2);
    assert_eq!(tree.children()[0].kind(), NodeKind::Paragraph);

    let book = &tree.children()[1];
    assert_eq!(book.kind(), NodeKind::Level);
    assert!(book.has_child_of_kind(NodeKind::ExplicitIdentifier));
    assert!(!book.has_child_of_kind(NodeKind::AbsoluteIdentifier));

    let sublevels: Vec<_> = book
        .children()
        .iter()
        .filter(|child| child.kind() == NodeKind::Level)
        .collect();
    assert_eq!(sublevels.len(), 2);
}

#[test]
fn test_relative_identifier_composes() {
    let mangled = mangle(&read(BOOK), &MangleOptions::default()).expect("Failed to mangle");

    let intro = mangled
        .designators
        .get(&id("\\book\\intro"))
        .expect("composite identifier is registered");
    assert_eq!(intro.end().kind(), NodeKind::Level);
    let list_paragraph = intro
        .end()
        .children()
        .iter()
        .find(|child| child.kind() == NodeKind::Paragraph)
        .expect("intro paragraph");
    assert_eq!(list_paragraph.child_count(), 1);
    assert_eq!(list_paragraph.children()[0].child_count(), 2);

    let usage = mangled
        .designators
        .get(&id("\\book\\Usage"))
        .expect("derived identifier is registered");
    assert!(usage.end().has_child_of_kind(NodeKind::ImplicitIdentifier));
}

#[test]
fn test_literals_are_separated() {
    let mangled = mangle(&read(BOOK), &MangleOptions::default()).expect("Failed to mangle");

    let usage = mangled.designators.get(&id("\\Usage")).expect("derived identifier");
    let paragraph = usage
        .end()
        .children()
        .iter()
        .find(|child| child.kind() == NodeKind::Paragraph)
        .expect("usage paragraph");
    let kinds: Vec<_> = paragraph.children().iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        [
            NodeKind::BlockOfLiteralInsideGraveAccents,
            NodeKind::ZeroWidthSpace,
            NodeKind::BlockOfLiteralInsideGraveAccents,
        ]
    );
}

#[test]
fn test_tag_filter_keeps_outline() {
    let options = MangleOptions {
        tag_filter: tag_set(["draft"]).expect("valid tag"),
        ..MangleOptions::default()
    };

    let mangled = mangle(&read(BOOK), &options).expect("Failed to mangle");

    // The preamble has no tag; the book level keeps only the tagged paragraph.
    let tree = &mangled.tree;
    assert_eq!(tree.child_count(), 1);
    let book = &tree.children()[0];
    let blocks: Vec<_> = book
        .children()
        .iter()
        .filter(|child| child.kind().is_block())
        .collect();
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].has_child_of_kind(NodeKind::ExplicitTag));
    assert!(mangled.designators.get(&id("\\book\\intro")).is_none());
    assert!(mangled.designators.get(&id("\\book")).is_some());
}

#[test]
fn test_mangled_tree_is_a_fixed_point() {
    let options = MangleOptions::default();
    let once = mangle(&read(BOOK), &options).expect("Failed to mangle");

    let twice = mangle(&once.tree, &options).expect("Failed to mangle again");

    assert_eq!(twice.tree, once.tree);
    assert_eq!(
        twice.designators.pure_identifiers(),
        once.designators.pure_identifiers()
    );
}

#[test]
fn test_filtered_tree_is_a_fixed_point() {
    // Both levels derive `\Notes`; the filter drops the second one.
    let source = r#"
(DOCUMENT
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (LEVEL_TITLE (WORD "Notes")))
  (PARAGRAPH (TAG "x") (WORD "kept"))
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (LEVEL_TITLE (WORD "Notes")))
  (PARAGRAPH (WORD "dropped")))
"#;
    let options = MangleOptions {
        tag_filter: tag_set(["x"]).expect("valid tag"),
        ..MangleOptions::default()
    };
    let once = mangle(&read(source), &options).expect("Failed to mangle");

    let twice = mangle(&once.tree, &options).expect("Failed to mangle again");

    assert_eq!(once.tree.child_count(), 1);
    let notes = once
        .designators
        .get(&id("\\Notes"))
        .expect("derived identifier no longer collides");
    assert!(notes.end().has_child_of_kind(NodeKind::ImplicitIdentifier));
    assert_eq!(twice.tree, once.tree);
    assert_eq!(
        twice.designators.derived_identifiers(),
        once.designators.derived_identifiers()
    );
}

#[test]
fn test_notation_round_trip_of_mangled_tree() {
    let mangled = mangle(&read(BOOK), &MangleOptions::default()).expect("Failed to mangle");

    let written = notation::write(&mangled.tree);
    let reread = notation::read(&written, None).expect("written notation reads back");

    assert_eq!(reread, mangled.tree);
}

#[test]
fn test_errors_carry_codes_and_locations() {
    let cases = [
        (
            "(DOCUMENT\n  (PARAGRAPH (RELATIVE_IDENTIFIER \"orphan\")))",
            ErrorCode::E100,
        ),
        (
            "(DOCUMENT\n  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT \"===\")))",
            ErrorCode::E200,
        ),
        (
            "(DOCUMENT\n  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT \"=\")))",
            ErrorCode::E201,
        ),
    ];

    for (source, code) in cases {
        let err = mangle(&read(source), &MangleOptions::default()).expect_err(source);
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(code));
        let location = diagnostic.primary_location().expect("location");
        assert_eq!(location.source_name(), Some("test.quire"));
        assert_eq!(location.line(), 2);
    }
}
