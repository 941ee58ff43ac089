//! Error types for format and editing operations
//!
//! Parsing and serializing Markdown never fail. Errors only surface at the edges: looking up a
//! format that does not exist, asking a format for a direction it does not support, or
//! addressing a position that is not inside the document.

use std::fmt;

/// Failures of the format registry and the non-Markdown formats
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No format is registered under this name
    FormatNotFound(String),
    /// A view could not be encoded
    SerializationError(String),
    /// The format does not go in the requested direction, or rejects a parameter
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Unknown format '{name}'"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors returned by the in-place document mutators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The block index is past the end of the document
    BlockOutOfRange { block: usize, blocks: usize },
    /// The offset is past the end of the block or splits a UTF-8 sequence
    InvalidOffset { block: usize, offset: usize },
    /// The range end lies before its start
    InvertedRange { start: usize, end: usize },
    /// The operation needs an ordered list item
    NotAnOrderedItem(usize),
    /// Heading levels are 1 through 6
    InvalidHeadingLevel(u8),
    /// Inserted text may not contain line breaks
    UnexpectedNewline,
    /// Tables and rules hold no text to insert into
    NoTextContent(usize),
    /// A link target must be non-empty and free of `)` and line breaks
    InvalidLinkTarget(String),
    /// Link text may not contain `]`
    InvalidLinkText(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::BlockOutOfRange { block, blocks } => {
                write!(f, "Block {block} is out of range (document has {blocks})")
            }
            EditError::InvalidOffset { block, offset } => {
                write!(f, "Offset {offset} is not a valid position in block {block}")
            }
            EditError::InvertedRange { start, end } => {
                write!(f, "Range end {end} precedes start {start}")
            }
            EditError::NotAnOrderedItem(block) => {
                write!(f, "Block {block} is not an ordered list item")
            }
            EditError::InvalidHeadingLevel(level) => {
                write!(f, "Heading level {level} is outside 1..=6")
            }
            EditError::UnexpectedNewline => {
                write!(f, "Inserted text contains a newline; split the block instead")
            }
            EditError::NoTextContent(block) => {
                write!(f, "Block {block} is a table or rule and holds no text")
            }
            EditError::InvalidLinkTarget(target) => {
                write!(f, "Link target {target:?} cannot be written as Markdown")
            }
            EditError::InvalidLinkText(text) => {
                write!(f, "Link text {text:?} contains ']'")
            }
        }
    }
}

impl std::error::Error for EditError {}
