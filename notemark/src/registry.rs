//! Lookup of formats by name or file extension
//!
//! The CLI and embedders never name a format type directly; they ask the registry for
//! `"markdown"`, `"json"` or `"treeviz"`. Markdown parsing depends on [`ParseOptions`] (theme,
//! notes root, image loader), so a registry is built for one set of options.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::parser::ParseOptions;
use crate::formats::{JsonFormat, MarkdownFormat, TreevizFormat};
use crate::model::StyledDocument;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Formats keyed by name
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let doc = registry.parse("# Groceries\n- eggs", "markdown")?;
/// let tree = registry.serialize(&doc, "treeviz")?;
/// ```
#[derive(Default)]
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// A registry without any formats.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Markdown with default options, plus the inspection formats.
    pub fn with_defaults() -> Self {
        Self::with_parse_options(ParseOptions::default())
    }

    /// Markdown configured by `options`, plus the inspection formats.
    pub fn with_parse_options(options: ParseOptions) -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownFormat::new(options));
        registry.register(JsonFormat);
        registry.register(TreevizFormat);
        registry
    }

    /// Add a format, replacing any format registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let name = format.name().to_string();
        if self.formats.insert(name.clone(), Box::new(format)).is_some() {
            log::debug!("format '{name}' replaced");
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        match self.formats.get(name) {
            Some(format) => Ok(format.as_ref()),
            None => Err(FormatError::FormatNotFound(name.to_string())),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// The format claiming the file's extension, compared case-insensitively.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<StyledDocument, FormatError> {
        let target = self.get(format)?;
        if !target.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        target.parse(source)
    }

    pub fn serialize(&self, doc: &StyledDocument, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serialize, handing format-specific parameters through (see each format for the keys it
    /// understands).
    pub fn serialize_with_options(
        &self,
        doc: &StyledDocument,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let target = self.get(format)?;
        if !target.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        target.serialize_with_options(doc, options)
    }
}
