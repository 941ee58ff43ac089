//! Treeviz formatter for styled documents
//!
//! Treeviz is a visual representation of a [`StyledDocument`]: one line per block, one nested
//! line per run. It is meant for debugging the parser and for snapshot tests, where a change in
//! run boundaries or attributes should be obvious in a diff.
//!
//! So the format is :
//! <prefix><connector> <icon> <label>
//!
//! Runs show their text quoted (escapes visible) followed by their attributes in brackets.
//! Attachments show the Markdown source they will serialize back to.
//!
//! Example:
//!
//! ```text
//! ⧉ document (3 blocks)
//! ├─ § heading 1
//! │ └─ ◦ "Groceries" [bold h1]
//! ├─ • unordered
//! │ ├─ ▸ "-\t"
//! │ └─ ◦ "eggs" [italic]
//! └─ ― rule
//!   └─ ⊡ "---"
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Plain: ¶
//!     Heading: §
//!     ListItem: •
//!     HorizontalRule: ―
//!     Table: ▦
//!     Image: ▣
//!     Text: ◦
//!     Attachment: ⊡
//!     Marker: ▸

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Attributes, Block, BlockKind, Preview, Run, StyledDocument};
use std::collections::HashMap;

fn block_label(block: &Block) -> (&'static str, String) {
    match &block.kind {
        BlockKind::Plain if block.is_empty() => (get_icon("Plain"), "blank".to_string()),
        BlockKind::Plain => (get_icon("Plain"), "plain".to_string()),
        BlockKind::Heading { level } => (get_icon("Heading"), format!("heading {}", level.get())),
        BlockKind::UnorderedListItem => (get_icon("ListItem"), "unordered".to_string()),
        BlockKind::OrderedListItem { index } => (get_icon("ListItem"), format!("ordered {index}")),
        BlockKind::HorizontalRule => (get_icon("HorizontalRule"), "rule".to_string()),
        BlockKind::Table(spec) => (
            get_icon("Table"),
            format!("table {}x{}", spec.header.len(), spec.rows.len()),
        ),
        BlockKind::Image { path, .. } => (get_icon("Image"), format!("image {path}")),
    }
}

fn attribute_tags(attrs: &Attributes) -> Vec<String> {
    let mut tags = Vec::new();
    if attrs.bold {
        tags.push("bold".to_string());
    }
    if attrs.italic {
        tags.push("italic".to_string());
    }
    if attrs.underline {
        tags.push("underline".to_string());
    }
    if let Some(link) = &attrs.link {
        tags.push(format!("link={}", link.as_str()));
    }
    if let Some(level) = attrs.heading_level {
        tags.push(format!("h{}", level.get()));
    }
    tags
}

fn preview_label(preview: &Preview) -> String {
    match preview {
        Preview::Image(image) => format!("({}x{})", image.width, image.height),
        Preview::Table(table) => format!("({}x{})", table.width(), table.height()),
        Preview::Rule(rule) => format!("({}x{})", rule.width, rule.height),
    }
}

fn run_label(run: &Run, show_previews: bool) -> String {
    let (icon, mut label) = match &run.attachment {
        Some(attachment) => {
            let mut label = format!("{:?}", attachment.source);
            if show_previews {
                label.push(' ');
                label.push_str(&preview_label(&attachment.preview));
            }
            (get_icon("Attachment"), label)
        }
        None if run.attrs.list_marker => (get_icon("Marker"), format!("{:?}", run.text)),
        None => (get_icon("Text"), format!("{:?}", run.text)),
    };
    let tags = attribute_tags(&run.attrs);
    if !tags.is_empty() {
        label.push_str(&format!(" [{}]", tags.join(" ")));
    }
    format!("{icon} {label}")
}

/// Number of source lines a block was parsed from.
fn source_lines(block: &Block) -> usize {
    block
        .table_source()
        .map(|source| source.lines().count())
        .unwrap_or(1)
}

pub fn to_treeviz_str(doc: &StyledDocument) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"show-linum"`: prefix each block with the source line it starts on.
/// - `"show-previews"`: append the preview size to attachment runs.
pub fn to_treeviz_str_with_params(doc: &StyledDocument, params: &HashMap<String, String>) -> String {
    let flag = |name: &str| params.get(name).map(|v| v != "false").unwrap_or(false);
    let show_linum = flag("show-linum");
    let show_previews = flag("show-previews");

    let mut output = format!(
        "{} document ({} blocks)\n",
        get_icon("Document"),
        doc.blocks.len()
    );

    let mut line = 1;
    for (i, block) in doc.blocks.iter().enumerate() {
        let is_last = i == doc.blocks.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        let (icon, label) = block_label(block);
        let linum_prefix = if show_linum {
            format!("{line:02} ")
        } else {
            String::new()
        };
        output.push_str(&format!("{linum_prefix}{connector} {icon} {label}\n"));

        let pad = if show_linum { "   " } else { "" };
        let child_prefix = format!("{pad}{}", if is_last { "  " } else { "│ " });
        for (j, run) in block.runs.iter().enumerate() {
            let connector = if j == block.runs.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            output.push_str(&format!(
                "{child_prefix}{connector} {}\n",
                run_label(run, show_previews)
            ));
        }
        line += source_lines(block);
    }
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of blocks and runs with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &StyledDocument) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &StyledDocument,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(doc, options))
    }
}
