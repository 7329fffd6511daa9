//! Integration tests for the DocumentBuilder API
//!
//! These tests verify that the public API works and is usable.

use quire::{
    DocumentBuilder, ErrorCode, Format, NodeKind, QuireError,
    config::AppConfig,
    identifier::FragmentIdentifier,
    tag::Tag,
};

const GUIDE: &str = r#"
(DOCUMENT
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "==") (ABSOLUTE_IDENTIFIER "guide")
    (LEVEL_TITLE (WORD "Guide")))
  (PARAGRAPH (WORD "Read") (WHITESPACE " ") (WORD "this") (WHITESPACE " ") (WORD "first"))
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "===")
    (LEVEL_TITLE (WORD "Install")))
  (PARAGRAPH (TAG "ops") (WORD "Run")
    (BLOCK_OF_LITERAL_INSIDE_GRAVE_ACCENTS "make"))
  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT "===")
    (LEVEL_TITLE (WORD "Usage")))
  (PARAGRAPH (WORD "Enjoy")))
"#;

#[test]
fn test_builder_api_exists() {
    // Just verify the API compiles and can be constructed
    let _builder = DocumentBuilder::default();
}

#[test]
fn test_compile_simple_document() {
    let builder = DocumentBuilder::default();
    let result = builder.compile(GUIDE);
    assert!(
        result.is_ok(),
        "Should compile valid document: {:?}",
        result.err()
    );
}

#[test]
fn test_designators_are_reachable() {
    let builder = DocumentBuilder::default();
    let mangled = builder.compile(GUIDE).expect("Failed to compile document");

    let install: FragmentIdentifier = "\\guide\\Install".parse().expect("valid identifier");
    let path = mangled
        .designators
        .get(&install)
        .expect("derived identifier is registered");
    assert_eq!(path.end().kind(), NodeKind::Level);
}

#[test]
fn test_render_text() {
    let builder = DocumentBuilder::default();
    let mangled = builder.compile(GUIDE).expect("Failed to compile document");

    let text = builder
        .render(&mangled, Format::Text)
        .expect("Failed to render");

    assert_eq!(
        text,
        "== Guide\n\nRead this first\n\n=== Install\n\nRun `make`\n\n=== Usage\n\nEnjoy\n"
    );
}

#[test]
fn test_render_notation_reads_back() {
    let builder = DocumentBuilder::default();
    let mangled = builder.compile(GUIDE).expect("Failed to compile document");

    let notation = builder
        .render(&mangled, Format::Notation)
        .expect("Failed to render");
    let reread = builder.read(&notation).expect("Rendered notation should read");

    assert_eq!(reread, mangled.tree);
}

#[test]
fn test_builder_with_tag_filter() {
    let config = AppConfig::default().with_tags([Tag::new("ops").expect("valid tag")]);
    let builder = DocumentBuilder::new(config);

    let mangled = builder.compile(GUIDE).expect("Failed to compile document");
    let text = builder
        .render(&mangled, Format::Text)
        .expect("Failed to render");

    assert_eq!(text, "== Guide\n\n=== Install\n\nRun `make`\n");
}

#[test]
fn test_errors_carry_source() {
    let source = "(DOCUMENT\n  (LEVEL_INTRODUCER (LEVEL_INTRODUCER_INDENT \"====\")))";
    let builder = DocumentBuilder::default().with_source_name("broken.quire");

    let err = builder.compile(source).expect_err("depth jump should fail");

    match err {
        QuireError::Mangle { err, src } => {
            assert_eq!(src, source);
            let diagnostic = &err.diagnostics()[0];
            assert_eq!(diagnostic.code(), Some(ErrorCode::E200));
            let location = diagnostic.primary_location().expect("location");
            assert_eq!(location.to_string(), "broken.quire:2:3");
        }
        other => panic!("Expected a mangle error, got {other:?}"),
    }
}

#[test]
fn test_malformed_notation() {
    let builder = DocumentBuilder::default();

    let err = builder
        .compile("(DOCUMENT (PARAGRAPH")
        .expect_err("unbalanced notation should fail");

    assert!(matches!(err, QuireError::Mangle { .. }));
}
