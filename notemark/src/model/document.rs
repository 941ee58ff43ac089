//! Document, block and run types.

use super::attachment::{Attachment, OBJECT_REPLACEMENT};
use super::attributes::{Attributes, HeadingLevel};
use crate::edit::PendingStyle;
use serde::Serialize;
use std::ops::Range;

/// A contiguous span of text sharing one attribute set, or a single attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub attrs: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Run {
    pub fn text(text: impl Into<String>, attrs: Attributes) -> Self {
        Run {
            text: text.into(),
            attrs,
            attachment: None,
        }
    }

    pub fn attachment(attachment: Attachment, attrs: Attributes) -> Self {
        Run {
            text: OBJECT_REPLACEMENT.to_string(),
            attrs,
            attachment: Some(attachment),
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    /// Length in bytes of the run's text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn merges_with(&self, other: &Run) -> bool {
        !self.is_attachment() && !other.is_attachment() && self.attrs == other.attrs
    }
}

/// Alignment markers from a table separator row. Parsed but not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlignment {
    Left,
    Center,
    Right,
    None,
}

/// Structured view of a pipe table. The verbatim Markdown lives on the block's attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub alignments: Vec<ColumnAlignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Plain,
    Heading { level: HeadingLevel },
    UnorderedListItem,
    OrderedListItem { index: u64 },
    HorizontalRule,
    Table(TableSpec),
    Image { alt: String, path: String },
}

impl BlockKind {
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            BlockKind::UnorderedListItem | BlockKind::OrderedListItem { .. }
        )
    }
}

/// One line of the document (or one whole table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub runs: Vec<Run>,
}

impl Block {
    /// Build a block, merging adjacent runs that share attributes.
    pub fn new(kind: BlockKind, runs: Vec<Run>) -> Self {
        Block {
            kind,
            runs: normalize_runs(runs),
        }
    }

    /// A blank line.
    pub fn empty() -> Self {
        Block {
            kind: BlockKind::Plain,
            runs: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }

    pub fn is_list_item(&self) -> bool {
        self.kind.is_list_item()
    }

    /// Heading level from the block kind, falling back to the first content run.
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match &self.kind {
            BlockKind::Heading { level } => Some(*level),
            _ => self
                .runs
                .iter()
                .find(|run| !run.attrs.list_marker)
                .and_then(|run| run.attrs.heading_level),
        }
    }

    /// Byte offset where editable content starts: just past the first tab for list items.
    pub fn content_start(&self) -> usize {
        if !self.is_list_item() {
            return 0;
        }
        self.text().find('\t').map(|tab| tab + 1).unwrap_or(0)
    }

    /// Verbatim Markdown of a table block.
    pub fn table_source(&self) -> Option<&str> {
        match self.kind {
            BlockKind::Table(_) => self
                .runs
                .iter()
                .find_map(|run| run.attachment.as_ref())
                .map(|attachment| attachment.source.as_str()),
            _ => None,
        }
    }

    /// Runs clipped to a byte range of the block text.
    pub fn runs_in(&self, range: Range<usize>) -> Vec<Run> {
        slice_runs(&self.runs, range)
    }

    /// Attributes of the character starting at `offset`, if any.
    pub fn attrs_at(&self, offset: usize) -> Option<&Attributes> {
        run_at(&self.runs, offset).map(|(index, _)| &self.runs[index].attrs)
    }

    /// Merge adjacent equal runs and drop empty text runs.
    pub fn normalize(&mut self) {
        self.runs = normalize_runs(std::mem::take(&mut self.runs));
    }

    /// Make sure a run boundary falls at `offset`. Offsets inside an attachment are left alone.
    pub(crate) fn split_at(&mut self, offset: usize) {
        let Some((index, run_start)) = run_at(&self.runs, offset) else {
            return;
        };
        if run_start == offset || self.runs[index].is_attachment() {
            return;
        }
        let run = &mut self.runs[index];
        let tail = run.text.split_off(offset - run_start);
        let tail = Run::text(tail, run.attrs.clone());
        self.runs.insert(index + 1, tail);
    }
}

/// The whole structured document: blocks in line order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyledDocument {
    pub blocks: Vec<Block>,
    /// Styling chosen at a caret, applied to the next text typed there.
    #[serde(skip)]
    pub(crate) pending_style: Option<PendingStyle>,
}

impl StyledDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        StyledDocument {
            blocks,
            pending_style: None,
        }
    }

    /// Block texts joined by line breaks; attachments appear as U+FFFC.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}

/// Index of the run containing byte `offset`, with that run's starting offset.
fn run_at(runs: &[Run], offset: usize) -> Option<(usize, usize)> {
    let mut start = 0;
    for (index, run) in runs.iter().enumerate() {
        let end = start + run.len();
        if offset < end {
            return Some((index, start));
        }
        start = end;
    }
    None
}

/// Copy of the runs overlapping `range`, with text runs cut at the range edges.
///
/// Attachments are indivisible: one that overlaps the range is kept whole.
pub fn slice_runs(runs: &[Run], range: Range<usize>) -> Vec<Run> {
    let mut out = Vec::new();
    let mut start = 0;
    for run in runs {
        let end = start + run.len();
        if end <= range.start {
            start = end;
            continue;
        }
        if start >= range.end {
            break;
        }
        if run.is_attachment() {
            out.push(run.clone());
        } else {
            let from = range.start.max(start) - start;
            let to = range.end.min(end) - start;
            if from < to {
                out.push(Run::text(&run.text[from..to], run.attrs.clone()));
            }
        }
        start = end;
    }
    out
}

/// Merge adjacent text runs with identical attributes and drop empty text runs.
pub fn normalize_runs(runs: Vec<Run>) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.is_empty() && !run.is_attachment() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.merges_with(&run) => last.text.push_str(&run.text),
            _ => out.push(run),
        }
    }
    out
}
