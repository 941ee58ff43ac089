//! Style registry
//!
//!     The attribute vocabulary lives in [`crate::model::Attributes`]; this module maps it onto
//!     concrete presentation. Both the parser and the mutators start from the same base attribute
//!     sets, and anything that draws a document resolves runs through [`Theme::resolve`] and
//!     blocks through [`Theme::paragraph_style`].
//!
//!     The defaults reproduce the app's stock look: a 16pt body, headings stepping down from 28pt,
//!     slate text on a pale background and blue links.
//!
//!     Text measurement is approximate. There is no font engine here, so widths come from an
//!     average glyph width relative to the font size. That is enough for sizing table previews,
//!     which is the only place the library needs it.

use crate::model::{Attributes, BlockKind, HeadingLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSlant {
    Upright,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSpec {
    pub size: f32,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

/// Concrete presentation of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedStyle {
    pub font: FontSpec,
    pub color: Color,
    pub underline: bool,
}

/// Paragraph-level layout of one block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ParagraphStyle {
    pub line_spacing: f32,
    pub spacing_before: f32,
    pub spacing_after: f32,
    pub head_indent: f32,
    pub tab_stop: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub text: Color,
    pub link: Color,
    pub heading: Color,
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            text: Color::rgb(0x54, 0x61, 0x70),
            link: Color::rgb(0x33, 0x80, 0xD9),
            heading: Color::rgb(0x38, 0x45, 0x54),
            background: Color::rgb(0xF5, 0xF7, 0xFA),
        }
    }
}

/// List item indentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListLayout {
    pub head_indent: f32,
    pub tab_stop: f32,
    pub paragraph_spacing: f32,
}

impl Default for ListLayout {
    fn default() -> Self {
        ListLayout {
            head_indent: 24.0,
            tab_stop: 24.0,
            paragraph_spacing: 4.0,
        }
    }
}

/// Table preview geometry and shading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub padding_h: f32,
    pub padding_v: f32,
    /// Narrowest text area of a column; cell padding comes on top.
    pub min_column_width: f32,
    /// Widest a whole table may be before columns are scaled down.
    pub max_width: f32,
    pub header_background: Color,
    pub stripe_background: Color,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout {
            padding_h: 12.0,
            padding_v: 8.0,
            min_column_width: 30.0,
            max_width: 560.0,
            header_background: Color::rgb(0xE3, 0xE8, 0xED),
            stripe_background: Color::rgb(0xF7, 0xF7, 0xFA),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub body_size: f32,
    /// Point sizes for heading levels 1 through 6.
    pub heading_sizes: [f32; 6],
    pub colors: Palette,
    pub line_spacing: f32,
    pub paragraph_spacing: f32,
    pub list: ListLayout,
    pub table: TableLayout,
    pub image_max_width: f32,
    pub rule_width: f32,
    pub rule_height: f32,
    /// Average glyph advance as a fraction of the font size.
    pub glyph_width_ratio: f32,
    /// Ascender to descender distance as a fraction of the font size.
    pub line_height_ratio: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            body_size: 16.0,
            heading_sizes: [28.0, 24.0, 20.0, 18.0, 16.0, 14.0],
            colors: Palette::default(),
            line_spacing: 10.0,
            paragraph_spacing: 16.0,
            list: ListLayout::default(),
            table: TableLayout::default(),
            image_max_width: 500.0,
            rule_width: 1000.0,
            rule_height: 1.0,
            glyph_width_ratio: 0.55,
            line_height_ratio: 1.25,
        }
    }
}

impl Theme {
    pub fn heading_size(&self, level: HeadingLevel) -> f32 {
        self.heading_sizes[level.index()]
    }

    pub fn resolve(&self, attrs: &Attributes) -> ResolvedStyle {
        let (size, color) = match attrs.heading_level {
            Some(level) => (self.heading_size(level), self.colors.heading),
            None => (self.body_size, self.colors.text),
        };
        let color = if attrs.link.is_some() {
            self.colors.link
        } else {
            color
        };
        let weight = if attrs.bold || attrs.heading_level.is_some() {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        };
        let slant = if attrs.italic {
            FontSlant::Italic
        } else {
            FontSlant::Upright
        };
        ResolvedStyle {
            font: FontSpec {
                size,
                weight,
                slant,
            },
            color,
            underline: attrs.renders_underlined(),
        }
    }

    pub fn paragraph_style(&self, kind: &BlockKind) -> ParagraphStyle {
        let base = ParagraphStyle {
            line_spacing: self.line_spacing,
            spacing_after: self.paragraph_spacing,
            ..ParagraphStyle::default()
        };
        match kind {
            BlockKind::Heading { level } => {
                let major = level.get() <= 2;
                ParagraphStyle {
                    spacing_before: if major { 16.0 } else { 10.0 },
                    spacing_after: if major { 10.0 } else { 6.0 },
                    ..base
                }
            }
            BlockKind::UnorderedListItem | BlockKind::OrderedListItem { .. } => ParagraphStyle {
                spacing_after: self.list.paragraph_spacing,
                head_indent: self.list.head_indent,
                tab_stop: Some(self.list.tab_stop),
                ..base
            },
            _ => base,
        }
    }

    /// Approximate rendered width of `text` at `size` points.
    pub fn measure_text(&self, text: &str, size: f32) -> f32 {
        (text.chars().count() as f32 * size * self.glyph_width_ratio).ceil()
    }

    /// Height of one line of text at `size` points.
    pub fn text_height(&self, size: f32) -> f32 {
        (size * self.line_height_ratio).ceil()
    }
}
