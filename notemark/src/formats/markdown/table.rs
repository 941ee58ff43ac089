//! Pipe tables
//!
//! A table is a row line followed by a separator line, plus every row or separator line after
//! them. The block keeps the source lines verbatim; the structured [`TableSpec`] and the preview
//! geometry are derived from them.

use crate::model::{ColumnAlignment, TablePreview, TableSpec};
use crate::style::Theme;

/// Trimmed line starts and ends with `|` and has more than two chars.
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.chars().count() > 2
}

/// A row made only of pipes, dashes, colons and spaces.
pub fn is_table_separator(line: &str) -> bool {
    is_table_row(line)
        && line
            .trim()
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Number of lines, starting at `lines[0]`, that make up a table. Zero when no table starts here.
pub fn table_extent(lines: &[&str]) -> usize {
    match lines {
        [head, separator, ..] if is_table_row(head) && is_table_separator(separator) => {
            2 + lines[2..]
                .iter()
                .take_while(|line| is_table_row(line))
                .count()
        }
        _ => 0,
    }
}

pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    line.split('|').map(|s| s.trim().to_string()).collect()
}

fn parse_alignments(separator: &str) -> Vec<ColumnAlignment> {
    split_cells(separator)
        .iter()
        .map(|part| {
            let starts = part.starts_with(':');
            let ends = part.ends_with(':');
            match (starts, ends) {
                (true, true) => ColumnAlignment::Center,
                (false, true) => ColumnAlignment::Right,
                (true, false) => ColumnAlignment::Left,
                (false, false) => ColumnAlignment::None,
            }
        })
        .collect()
}

/// Structured view of the table lines. `lines` must be a full table extent.
pub fn table_spec(lines: &[&str]) -> TableSpec {
    let header = lines.first().map(|line| split_cells(line)).unwrap_or_default();
    let alignments = lines.get(1).map(|line| parse_alignments(line)).unwrap_or_default();
    let rows = lines
        .iter()
        .skip(2)
        .filter(|line| !is_table_separator(line))
        .map(|line| split_cells(line))
        .collect();
    TableSpec {
        header,
        rows,
        alignments,
    }
}

/// Preview geometry: columns sized from content, shrunk to fit the theme's max width.
pub fn table_preview(spec: &TableSpec, theme: &Theme) -> TablePreview {
    let layout = &theme.table;
    let size = theme.body_size;
    let padding = layout.padding_h * 2.0;
    let mut widths = vec![layout.min_column_width + padding; spec.header.len()];

    for (width, cell) in widths.iter_mut().zip(&spec.header) {
        *width = width.max(theme.measure_text(cell, size) + padding);
    }
    for row in &spec.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = width.max(theme.measure_text(cell, size) + padding);
        }
    }

    let natural: f32 = widths.iter().sum();
    if natural > layout.max_width {
        let scale = layout.max_width / natural;
        for width in &mut widths {
            *width = (*width * scale).floor();
        }
    }

    let row_height = theme.text_height(size) + layout.padding_v * 2.0;
    TablePreview {
        column_widths: widths,
        header_height: row_height,
        row_height,
        shaded_rows: (0..spec.rows.len()).map(|i| i % 2 == 1).collect(),
    }
}
