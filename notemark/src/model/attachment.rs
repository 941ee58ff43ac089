//! Non-text payloads: images, tables and horizontal rules.
//!
//! Rendering these is lossy (pixel sizes, file existence), so every attachment keeps the exact
//! Markdown it came from. The serializer only ever writes `source`; `preview` is for display.

use serde::Serialize;
use std::path::PathBuf;

/// Text stand-in for an attachment inside a block's plain text.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub source: String,
    pub preview: Preview,
}

impl Attachment {
    pub fn new(source: impl Into<String>, preview: Preview) -> Self {
        Attachment {
            source: source.into(),
            preview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preview {
    Image(ImagePreview),
    Table(TablePreview),
    Rule(RulePreview),
}

/// Display size of a loaded image, already scaled to fit the text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePreview {
    pub path: PathBuf,
    pub width: f32,
    pub height: f32,
}

/// Layout of a rendered table grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub column_widths: Vec<f32>,
    pub header_height: f32,
    pub row_height: f32,
    /// One entry per data row; `true` rows get the alternate background.
    pub shaded_rows: Vec<bool>,
}

impl TablePreview {
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    pub fn height(&self) -> f32 {
        self.header_height + self.row_height * self.shaded_rows.len() as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulePreview {
    pub width: f32,
    pub height: f32,
}
