//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the notes Markdown dialect and
//! [`StyledDocument`].
//!
//! # Dialect
//!
//! The dialect is line oriented and deliberately small. It is not CommonMark: there is no
//! nesting, no code, no escaping. What it does support must survive an edit/save cycle exactly,
//! so the parser and serializer are written as a matched pair rather than on top of a general
//! Markdown library.
//!
//! | Markdown                   | Block / run                                        |
//! |----------------------------|----------------------------------------------------|
//! | `# Title` … `###### Title` | `Heading { level }`, every run tagged with level   |
//! | `- item`                   | `UnorderedListItem`, marker run `-\t`              |
//! | `3. item`                  | `OrderedListItem { index: 3 }`, marker run `3.\t`  |
//! | `---`                      | `HorizontalRule`, one rule attachment              |
//! | pipe table                 | `Table`, one table attachment holding all lines    |
//! | `![alt](path)` alone       | `Image`, one image attachment                      |
//! | `***x***`                  | bold + italic                                      |
//! | `**x**`                    | bold                                               |
//! | `*x*`                      | italic                                             |
//! | `<u>x</u>`                 | underline                                          |
//! | `[x](target)`              | link                                               |
//!
//! # Round trips
//!
//! Serializing a parsed document gives back canonical Markdown, and canonical Markdown survives
//! parse → serialize unchanged. Attachments (tables, rules, images) store their source text and
//! are written back byte for byte. Non-canonical input (`1.\tx`, extra blank lines at the end,
//! bold inside a heading) settles after one pass.

pub mod images;
pub mod inline;
pub mod parser;
pub mod serializer;
pub mod table;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::StyledDocument;
use parser::{ParseOptions, Parser};

/// Format implementation for Markdown
#[derive(Debug, Default)]
pub struct MarkdownFormat {
    parser: Parser,
}

impl MarkdownFormat {
    pub fn new(options: ParseOptions) -> Self {
        MarkdownFormat {
            parser: Parser::new(options),
        }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Notes Markdown dialect"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<StyledDocument, FormatError> {
        Ok(self.parser.parse(source))
    }

    fn serialize(&self, doc: &StyledDocument) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
