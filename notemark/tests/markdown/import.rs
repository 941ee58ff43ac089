//! Import tests for Markdown format (Markdown → StyledDocument)
//!
//! These tests verify that notes are parsed into the expected blocks and runs.

use crate::common::read_fixture;
use notemark::format::Format;
use notemark::formats::MarkdownFormat;
use notemark::{parse, Attributes, BlockKind, HeadingLevel, StyledDocument};

fn texts(doc: &StyledDocument, block: usize) -> Vec<&str> {
    doc.blocks[block]
        .runs
        .iter()
        .map(|run| run.text.as_str())
        .collect()
}

#[test]
fn test_kitchensink_block_kinds() {
    let doc = parse(&read_fixture("kitchensink.md"));
    let kinds: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| match &block.kind {
            BlockKind::Plain if block.is_empty() => "blank".to_string(),
            BlockKind::Plain => "plain".to_string(),
            BlockKind::Heading { level } => format!("h{}", level.get()),
            BlockKind::UnorderedListItem => "ul".to_string(),
            BlockKind::OrderedListItem { index } => format!("ol{index}"),
            BlockKind::HorizontalRule => "rule".to_string(),
            BlockKind::Table(_) => "table".to_string(),
            BlockKind::Image { .. } => "image".to_string(),
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "h1", "plain", "plain", "blank", "h2", "ul", "ul", "ol1", "ol2", "rule", "table",
            "blank", "h3", "plain", "blank"
        ]
    );
}

#[test]
fn test_inline_styles() {
    let doc = parse("Some **bold**, *italic*, ***both*** and <u>underlined</u> text.");
    assert_eq!(
        texts(&doc, 0),
        vec![
            "Some ",
            "bold",
            ", ",
            "italic",
            ", ",
            "both",
            " and ",
            "underlined",
            " text."
        ]
    );
    let runs = &doc.blocks[0].runs;
    assert!(runs[1].attrs.bold && !runs[1].attrs.italic);
    assert!(runs[3].attrs.italic && !runs[3].attrs.bold);
    assert!(runs[5].attrs.is_bold_italic());
    assert!(runs[7].attrs.underline);
    assert_eq!(runs[8].attrs, Attributes::body());
}

#[test]
fn test_links_keep_raw_target() {
    let doc = parse("See [the docs](https://docs.rs/regex) or [notes](notes/today.md).");
    let runs = &doc.blocks[0].runs;
    let absolute = runs[1].attrs.link.as_ref().unwrap();
    assert_eq!(absolute.as_str(), "https://docs.rs/regex");
    assert_eq!(absolute.url().map(|u| u.host_str()), Some(Some("docs.rs")));

    let relative = runs[3].attrs.link.as_ref().unwrap();
    assert_eq!(relative.as_str(), "notes/today.md");
    assert!(relative.url().is_none());
}

#[test]
fn test_headings() {
    let doc = parse("###### Six\n####### Seven\n#NoSpace\n# ");
    let level = HeadingLevel::new(6).unwrap();
    assert_eq!(doc.blocks[0].kind, BlockKind::Heading { level });
    assert_eq!(doc.blocks[0].runs[0].attrs, Attributes::heading(level));
    assert_eq!(doc.blocks[1].kind, BlockKind::Plain);
    assert_eq!(doc.blocks[2].kind, BlockKind::Plain);
    assert_eq!(doc.blocks[3].kind, BlockKind::Plain);
}

#[test]
fn test_lists() {
    let doc = parse("- milk\n-no space\n7. seven\n7.nope");
    assert_eq!(doc.blocks[0].kind, BlockKind::UnorderedListItem);
    assert_eq!(texts(&doc, 0), vec!["-\t", "milk"]);
    assert!(doc.blocks[0].runs[0].attrs.list_marker);
    assert_eq!(doc.blocks[1].kind, BlockKind::Plain);
    assert_eq!(doc.blocks[2].kind, BlockKind::OrderedListItem { index: 7 });
    assert_eq!(texts(&doc, 2), vec!["7.\t", "seven"]);
    assert_eq!(doc.blocks[3].kind, BlockKind::Plain);
}

#[test]
fn test_every_line_is_a_block() {
    assert_eq!(parse("").blocks.len(), 1);
    assert_eq!(parse("\n").blocks.len(), 2);
    assert_eq!(parse("a\n\nb").blocks.len(), 3);
}

#[test]
fn test_unclosed_markers_stay_literal() {
    let doc = parse("**open and *half and <u>never");
    assert_eq!(texts(&doc, 0), vec!["**open and *half and <u>never"]);
    assert_eq!(doc.blocks[0].runs[0].attrs, Attributes::body());
}

#[test]
fn test_markdown_format_is_bidirectional() {
    let format = MarkdownFormat::default();
    assert!(format.supports_parsing());
    assert!(format.supports_serialization());
    let doc = format.parse("## Title").unwrap();
    assert_eq!(format.serialize(&doc).unwrap(), "## Title");
}
