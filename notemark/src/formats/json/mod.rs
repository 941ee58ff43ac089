//! JSON dump of a styled document
//!
//! Serialize-only. The output mirrors the model types one to one (blocks, runs, attributes,
//! attachment previews) and is meant for inspecting what the parser produced, or for handing a
//! parsed note to another tool.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::StyledDocument;
use std::collections::HashMap;

pub fn to_json_str(doc: &StyledDocument, pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    result.map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
}

/// Format implementation for JSON output
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON dump of blocks, runs and attributes"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &StyledDocument) -> Result<String, FormatError> {
        to_json_str(doc, true)
    }

    /// Accepts `compact=true` for single-line output.
    fn serialize_with_options(
        &self,
        doc: &StyledDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let compact = options
            .get("compact")
            .map(|v| v != "false")
            .unwrap_or(false);
        to_json_str(doc, !compact)
    }
}
