//! Round-trip properties
//!
//! Canonical notes (what the serializer writes) must come back byte for byte, and formatting any
//! note twice must give the same result as formatting it once.

use crate::common::read_fixture;
use notemark::{
    parse, serialize, Attributes, Block, BlockKind, HeadingLevel, LinkTarget, Run, StyledDocument,
};
use proptest::prelude::*;

fn format(markdown: &str) -> String {
    serialize(&parse(markdown))
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// A styled word as the serializer writes it.
fn segment() -> impl Strategy<Value = String> {
    (word(), 0..6u8).prop_map(|(w, style)| match style {
        0 => w,
        1 => format!("**{w}**"),
        2 => format!("*{w}*"),
        3 => format!("***{w}***"),
        4 => format!("<u>{w}</u>"),
        _ => format!("[{w}](https://example.com/{w})"),
    })
}

/// Headings are bold already, so only bold-italic, underline and links show up inside them.
fn heading_segment() -> impl Strategy<Value = String> {
    (word(), 0..4u8).prop_map(|(w, style)| match style {
        0 => w,
        1 => format!("***{w}***"),
        2 => format!("<u>{w}</u>"),
        _ => format!("[{w}](https://example.com/{w})"),
    })
}

fn content(segment: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    prop::collection::vec(segment, 1..6).prop_map(|segments| segments.join(" "))
}

/// Segments written back to back, so markers of neighbours touch.
fn glued_content(segment: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    prop::collection::vec(segment, 1..6).prop_map(|segments| segments.concat())
}

/// Any line built from glued segments, canonical or not.
fn glued_line() -> impl Strategy<Value = String> {
    prop_oneof![
        glued_content(segment()),
        (1..=6usize, glued_content(heading_segment()))
            .prop_map(|(level, text)| format!("{} {text}", "#".repeat(level))),
        glued_content(segment()).prop_map(|text| format!("- {text}")),
        (1..1000u64, glued_content(segment()))
            .prop_map(|(index, text)| format!("{index}. {text}")),
    ]
}

/// A run of lowercase words with any mix of bold, italic, underline and a link.
fn styled_run() -> impl Strategy<Value = Run> {
    (
        "[a-z ]{1,6}",
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::weighted(0.2, 0..2u8),
    )
        .prop_map(|(text, bold, italic, underline, link)| {
            let attrs = Attributes {
                bold,
                italic,
                underline,
                link: link.map(|n| LinkTarget::parse(format!("https://example.com/{n}"))),
                ..Attributes::body()
            };
            Run::text(text, attrs)
        })
}

/// A one-block document whose runs come straight from the editor, not from Markdown.
fn styled_block() -> impl Strategy<Value = StyledDocument> {
    let kind = prop_oneof![
        Just(BlockKind::Plain),
        Just(BlockKind::UnorderedListItem),
        (1..10u64).prop_map(|index| BlockKind::OrderedListItem { index }),
        (1..=6u8).prop_filter_map("heading level", |level| {
            HeadingLevel::new(level).map(|level| BlockKind::Heading { level })
        }),
    ];
    (kind, prop::collection::vec(styled_run(), 1..8)).prop_map(|(kind, runs)| {
        let runs = match &kind {
            BlockKind::Heading { level } => runs
                .into_iter()
                .map(|run| Run {
                    attrs: Attributes {
                        heading_level: Some(*level),
                        ..run.attrs
                    },
                    ..run
                })
                .collect(),
            BlockKind::UnorderedListItem => {
                let mut with_marker = vec![Run::text("-\t", Attributes::list_marker())];
                with_marker.extend(runs);
                with_marker
            }
            BlockKind::OrderedListItem { index } => {
                let marker = Run::text(format!("{index}.\t"), Attributes::list_marker());
                let mut with_marker = vec![marker];
                with_marker.extend(runs);
                with_marker
            }
            _ => runs,
        };
        StyledDocument::new(vec![Block::new(kind, runs)])
    })
}

const TABLE: &str = "| a | b |\n|:--|--:|\n| 1 | 2 |";

/// One canonical line (or a table).
fn canonical_line() -> impl Strategy<Value = String> {
    prop_oneof![
        content(segment()),
        (1..=6usize, content(heading_segment()))
            .prop_map(|(level, text)| format!("{} {text}", "#".repeat(level))),
        content(segment()).prop_map(|text| format!("- {text}")),
        (1..1000u64, content(segment())).prop_map(|(index, text)| format!("{index}. {text}")),
        Just(String::new()),
        Just("---".to_string()),
        Just(TABLE.to_string()),
    ]
}

fn canonical_note() -> impl Strategy<Value = String> {
    prop::collection::vec(canonical_line(), 0..12).prop_map(|lines| {
        lines
            .join("\n")
            .trim_end_matches('\n')
            .to_string()
    })
}

/// A canonical note together with a sloppier spelling of the same note.
fn sloppy_note() -> impl Strategy<Value = (String, String)> {
    let line = prop_oneof![
        content(segment()).prop_map(|text| (text.clone(), text)),
        (1..=6usize, 1..4usize, content(heading_segment())).prop_map(|(level, spaces, text)| {
            let hashes = "#".repeat(level);
            (
                format!("{hashes} {text}"),
                format!("{hashes}{}{text}", " ".repeat(spaces)),
            )
        }),
        (1..1000u64, 1..4usize, content(segment())).prop_map(|(index, spaces, text)| {
            (
                format!("{index}. {text}"),
                format!("{index}.{}{text}", " ".repeat(spaces)),
            )
        }),
    ];
    (prop::collection::vec(line, 1..8), 0..3usize).prop_map(|(lines, trailing)| {
        let canonical: Vec<String> = lines.iter().map(|(c, _)| c.clone()).collect();
        let sloppy: Vec<String> = lines.iter().map(|(_, s)| s.clone()).collect();
        (
            canonical.join("\n"),
            format!("{}{}", sloppy.join("\n"), "\n".repeat(trailing)),
        )
    })
}

proptest! {
    #[test]
    fn canonical_notes_round_trip(note in canonical_note()) {
        prop_assert_eq!(format(&note), note);
    }

    #[test]
    fn glued_markers_format_once(line in glued_line()) {
        let once = format(&line);
        prop_assert_eq!(format(&once), once);
    }

    #[test]
    fn edited_runs_serialize_to_a_fixed_point(doc in styled_block()) {
        let markdown = serialize(&doc);
        prop_assert_eq!(format(&markdown), markdown.clone());
        if doc.blocks[0].kind == BlockKind::Plain {
            prop_assert_eq!(parse(&markdown).plain_text(), doc.plain_text());
        }
    }

    #[test]
    fn sloppy_notes_format_to_canonical((canonical, sloppy) in sloppy_note()) {
        let once = format(&sloppy);
        prop_assert_eq!(&once, &canonical);
        prop_assert_eq!(format(&once), once);
    }
}

#[test]
fn test_touching_markers_stay_apart() {
    for (source, expected) in [
        ("*x*<u>*x*</u>", "*x<u>x</u>*"),
        ("* *<u>a</u>*", "* *<u>a</u>*"),
        ("**b***a*", "**b***a*"),
        ("*a***b**", "*a***b**"),
    ] {
        let once = format(source);
        assert_eq!(once, expected, "{source:?}");
        assert_eq!(format(&once), once);
    }
}

#[test]
fn test_kitchensink_round_trip() {
    let source = read_fixture("kitchensink.md");
    assert_eq!(format(&source), source.trim_end_matches('\n'));
}

#[test]
fn test_messy_fixture_formats_once() {
    let formatted = format(&read_fixture("messy.md"));
    assert_eq!(
        formatted,
        "# Weekly plan\n1. first\n12. twelfth\n## Already bold"
    );
    assert_eq!(format(&formatted), formatted);
}
