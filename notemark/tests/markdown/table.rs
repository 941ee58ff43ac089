//! Table tests: detection, structure, preview geometry and verbatim round trip.

use notemark::model::{ColumnAlignment, Preview, TablePreview};
use notemark::style::Theme;
use notemark::{parse, serialize, BlockKind, ParseOptions, Parser};

fn preview(source: &str) -> TablePreview {
    let doc = parse(source);
    match &doc.blocks[0].runs[0].attachment.as_ref().unwrap().preview {
        Preview::Table(table) => table.clone(),
        other => panic!("expected a table preview, got {other:?}"),
    }
}

#[test]
fn test_table_structure() {
    let source = "| Item | Qty | Note |\n|:-----|----:|:---:|\n| eggs | 12 | fresh |\n| milk | 2 |";
    let doc = parse(source);
    assert_eq!(doc.blocks.len(), 1);
    let BlockKind::Table(spec) = &doc.blocks[0].kind else {
        panic!("expected a table, got {:?}", doc.blocks[0].kind);
    };
    assert_eq!(spec.header, vec!["Item", "Qty", "Note"]);
    assert_eq!(
        spec.alignments,
        vec![
            ColumnAlignment::Left,
            ColumnAlignment::Right,
            ColumnAlignment::Center
        ]
    );
    assert_eq!(spec.rows, vec![vec!["eggs", "12", "fresh"], vec!["milk", "2"]]);
    assert_eq!(doc.blocks[0].table_source(), Some(source));
}

#[test]
fn test_table_source_round_trips_verbatim() {
    let source = "before\n|a|b|\n| - | - |\n|  1|2  |\n|---|---|\n| 3 | 4 |\nafter";
    let doc = parse(source);
    assert_eq!(doc.blocks.len(), 3);
    assert!(matches!(doc.blocks[1].kind, BlockKind::Table(_)));
    assert_eq!(serialize(&doc), source);
}

#[test]
fn test_row_without_separator_is_text() {
    let doc = parse("| just | pipes |\n| more | pipes |");
    assert!(doc
        .blocks
        .iter()
        .all(|block| block.kind == BlockKind::Plain));
    assert_eq!(serialize(&doc), "| just | pipes |\n| more | pipes |");
}

#[test]
fn test_preview_sizes_columns_from_content() {
    let table = preview("| a | a much longer header |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n| 5 | 6 |");
    // min column (30) plus padding on both sides (2 * 12)
    assert_eq!(table.column_widths[0], 54.0);
    // 20 chars * 16pt * 0.55, plus padding
    assert_eq!(table.column_widths[1], 176.0 + 24.0);
    assert_eq!(table.header_height, 36.0);
    assert_eq!(table.row_height, 36.0);
    assert_eq!(table.shaded_rows, vec![false, true, false]);
    assert_eq!(table.height(), 36.0 * 4.0);
}

#[test]
fn test_preview_scales_down_wide_tables() {
    let cell = "x".repeat(100);
    let source = format!("| {cell} | {cell} |\n|---|---|");
    let table = preview(&source);
    assert!(table.width() <= 560.0);
    assert!(table.width() >= 558.0);
    assert_eq!(table.column_widths[0], table.column_widths[1]);
    assert_eq!(table.column_widths[0].fract(), 0.0);
}

#[test]
fn test_preview_follows_theme() {
    let mut theme = Theme::default();
    theme.table.padding_h = 4.0;
    theme.table.padding_v = 2.0;
    let parser = Parser::new(ParseOptions {
        theme,
        ..ParseOptions::default()
    });
    let doc = parser.parse("| a |\n|---|");
    let Preview::Table(table) = &doc.blocks[0].runs[0].attachment.as_ref().unwrap().preview else {
        panic!("expected a table preview");
    };
    assert_eq!(table.column_widths, vec![38.0]);
    assert_eq!(table.row_height, 24.0);
    assert!(table.shaded_rows.is_empty());
}
