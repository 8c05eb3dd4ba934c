//! Tests for page sources and token canonicalization.

use std::io::Write;

use relayout::{to_markdown, Error, MemorySource, PageSource, Token, TokenDump};
use tempfile::NamedTempFile;

#[test]
fn test_open_token_dump() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"pages": [
            [{{"text": "Methods", "x": 72, "y": 700, "height": 22}},
             {{"text": "Samples were collected daily.", "x": 72, "y": 680, "height": 10}}],
            [{{"text": "Results follow.", "x": 72, "y": 700, "height": 10}}]
        ]}}"#
    )
    .unwrap();

    let dump = TokenDump::open(file.path()).unwrap();
    assert_eq!(dump.page_count(), 2);
    assert_eq!(dump.extract_page(1).unwrap()[0].text, "Results follow.");

    let markdown = to_markdown(&dump).unwrap();
    assert!(markdown.starts_with("## Table of Contents\n\n  - [Methods](#methods)\n"));
    assert!(markdown.ends_with("Samples were collected daily.\n\n---\n\nResults follow.\n"));
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = TokenDump::open(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_dump() {
    assert!(matches!(
        TokenDump::from_json(r#"{"pages": [[{"text": "x"}]]}"#),
        Err(Error::Json(_))
    ));
    assert!(matches!(
        TokenDump::from_json(r#"[[{"text": "x", "x": 1, "y": 2, "height": -4}]]"#),
        Err(Error::InvalidTokens(_))
    ));
}

#[test]
fn test_page_out_of_range() {
    let source = MemorySource::new(vec![Vec::new()]);
    let err = source.extract_page(3).unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange(3, 1)));
    assert_eq!(err.page(), Some(4));
    assert_eq!(
        err.to_string(),
        "Page 4 is out of range (document has 1 pages)"
    );
}

#[test]
fn test_tokens_are_canonicalized() {
    let source = MemorySource::new(vec![vec![
        Token::new("The e\u{301}tude de\u{fb01}nes", 72.0, 700.0, 10.0),
        Token::new("work\u{fb02}ow.", 180.0, 700.0, 10.0),
        Token::new("   ", 250.0, 700.0, 10.0),
        Token::new("lost", f32::NAN, 700.0, 10.0),
    ]]);

    assert_eq!(
        to_markdown(&source).unwrap(),
        "The \u{e9}tude defines workflow.\n"
    );
}
