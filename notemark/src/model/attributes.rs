//! The closed attribute vocabulary shared by the parser, the serializer and the mutators.

use serde::Serialize;
use url::Url;

/// Heading depth, 1 (`#`) through 6 (`######`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(HeadingLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, handy for per-level lookup tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

/// Destination of a link.
///
/// `raw` is exactly what appeared between the parentheses and is what gets written back out.
/// `url` holds the parsed form when the target is an absolute URL; relative paths and other
/// opaque strings keep `url` empty but still act as links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<Url>,
}

impl LinkTarget {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let url = Url::parse(&raw).ok();
        LinkTarget { raw, url }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

/// Attributes carried by a run.
///
/// Font traits (`bold`, `italic`) combine freely with each other and with the link and heading
/// tags; they are independent dimensions rather than alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<HeadingLevel>,
    /// Set on the rendered list marker (`"-\t"`, `"3.\t"`), which never serializes as text.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub list_marker: bool,
}

impl Attributes {
    /// Default body text.
    pub fn body() -> Self {
        Attributes::default()
    }

    /// Base attributes of heading text. Headings render in a bold face, so the trait is set.
    pub fn heading(level: HeadingLevel) -> Self {
        Attributes {
            bold: true,
            heading_level: Some(level),
            ..Attributes::default()
        }
    }

    pub fn list_marker() -> Self {
        Attributes {
            list_marker: true,
            ..Attributes::default()
        }
    }

    /// Attributes a new block of this kind starts from, with inline styling stripped.
    pub fn base_for(level: Option<HeadingLevel>) -> Self {
        level.map(Attributes::heading).unwrap_or_default()
    }

    pub fn is_bold_italic(&self) -> bool {
        self.bold && self.italic
    }

    /// Links always draw underlined, whatever the `underline` flag says.
    pub fn renders_underlined(&self) -> bool {
        self.underline || self.link.is_some()
    }

    /// Drop inline styling while keeping block-level tags.
    pub fn plain(&self) -> Self {
        Attributes {
            list_marker: self.list_marker,
            ..Attributes::base_for(self.heading_level)
        }
    }
}
