//! Export tests for Markdown format (StyledDocument → Markdown)
//!
//! Documents are built by hand here so the serializer is exercised independently of the parser.

use notemark::model::{Attachment, Preview, RulePreview};
use notemark::{
    serialize, Attributes, Block, BlockKind, HeadingLevel, LinkTarget, Run, StyledDocument,
};

fn styled(text: &str, f: impl FnOnce(&mut Attributes)) -> Run {
    let mut attrs = Attributes::body();
    f(&mut attrs);
    Run::text(text, attrs)
}

#[test]
fn test_paragraph_markers() {
    let doc = StyledDocument::new(vec![Block::new(
        BlockKind::Plain,
        vec![
            Run::text("a ", Attributes::body()),
            styled("b", |a| a.bold = true),
            Run::text(" ", Attributes::body()),
            styled("c", |a| a.italic = true),
            Run::text(" ", Attributes::body()),
            styled("d", |a| {
                a.bold = true;
                a.italic = true
            }),
            Run::text(" ", Attributes::body()),
            styled("e", |a| a.underline = true),
            Run::text(" ", Attributes::body()),
            styled("f", |a| a.link = Some(LinkTarget::parse("https://f.example"))),
        ],
    )]);
    assert_eq!(
        serialize(&doc),
        "a **b** *c* ***d*** <u>e</u> [f](https://f.example)"
    );
}

#[test]
fn test_adjacent_runs_with_equal_attributes_merge() {
    let doc = StyledDocument::new(vec![Block::new(
        BlockKind::Plain,
        vec![
            styled("ab", |a| a.bold = true),
            styled("cd", |a| a.bold = true),
        ],
    )]);
    assert_eq!(serialize(&doc), "**abcd**");
}

#[test]
fn test_block_prefixes() {
    let level = HeadingLevel::new(3).unwrap();
    let doc = StyledDocument::new(vec![
        Block::new(
            BlockKind::Heading { level },
            vec![Run::text("Notes", Attributes::heading(level))],
        ),
        Block::new(
            BlockKind::UnorderedListItem,
            vec![
                Run::text("-\t", Attributes::list_marker()),
                Run::text("one", Attributes::body()),
            ],
        ),
        Block::new(
            BlockKind::OrderedListItem { index: 10 },
            vec![
                Run::text("10.\t", Attributes::list_marker()),
                Run::text("ten", Attributes::body()),
            ],
        ),
        Block::empty(),
        Block::new(
            BlockKind::HorizontalRule,
            vec![Run::attachment(
                Attachment::new(
                    "---",
                    Preview::Rule(RulePreview {
                        width: 1000.0,
                        height: 1.0,
                    }),
                ),
                Attributes::body(),
            )],
        ),
    ]);
    assert_eq!(serialize(&doc), "### Notes\n- one\n10. ten\n\n---");
}

#[test]
fn test_heading_detected_from_run_attributes() {
    let level = HeadingLevel::new(1).unwrap();
    let doc = StyledDocument::new(vec![Block::new(
        BlockKind::Plain,
        vec![Run::text("Loose heading", Attributes::heading(level))],
    )]);
    assert_eq!(serialize(&doc), "# Loose heading");
}

#[test]
fn test_trailing_blank_lines_are_dropped() {
    let doc = StyledDocument::new(vec![
        Block::new(BlockKind::Plain, vec![Run::text("a", Attributes::body())]),
        Block::empty(),
        Block::empty(),
    ]);
    assert_eq!(serialize(&doc), "a");
    assert_eq!(serialize(&StyledDocument::default()), "");
    assert_eq!(serialize(&StyledDocument::new(vec![Block::empty()])), "");
}

#[test]
fn test_markdown_special_chars_are_not_escaped() {
    let doc = StyledDocument::new(vec![Block::new(
        BlockKind::Plain,
        vec![Run::text("2 * 3 = 6, a_b [x]", Attributes::body())],
    )]);
    assert_eq!(serialize(&doc), "2 * 3 = 6, a_b [x]");
}
