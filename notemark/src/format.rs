//! The interface every document format implements
//!
//! Markdown is the only format that goes both ways. The inspection formats only write.

use crate::error::FormatError;
use crate::model::StyledDocument;
use std::collections::HashMap;

/// Conversion between text and a [`StyledDocument`], in one or both directions
///
/// Every method except [`name`](Format::name) has a default, so a write-only format only needs
/// to opt into serialization:
///
/// ```ignore
/// struct Outline;
///
/// impl Format for Outline {
///     fn name(&self) -> &str {
///         "outline"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &StyledDocument) -> Result<String, FormatError> {
///         Ok(doc.plain_text())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key, also accepted by `--from` and `--to`.
    fn name(&self) -> &str;

    /// One line for `--list-formats`.
    fn description(&self) -> &str {
        ""
    }

    /// Extensions, without the dot, that select this format for an input file.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<StyledDocument, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _doc: &StyledDocument) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// [`serialize`](Format::serialize) with `--extra-*` parameters. Formats that take none keep
    /// this default, which refuses any parameter.
    fn serialize_with_options(
        &self,
        doc: &StyledDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
