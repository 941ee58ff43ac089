//! In-place editing of a [`StyledDocument`]
//!
//!     These are the formatting commands of the note editor, expressed on the document model
//!     instead of on a live text view. Each one validates its position, changes the document in
//!     place and leaves it in a state the serializer writes out as canonical Markdown.
//!
//!     Positions are byte offsets into one block's plain text (see [`Block::text`]). An attachment
//!     counts as the three bytes of U+FFFC and cannot be entered. List markers are not editable:
//!     ranges that reach into a marker are clamped to the start of the item's content.
//!
//!     Toggling bold, italic or underline with an empty selection styles the text typed next at
//!     that caret instead (see [`PendingStyle`]). Any other edit forgets the pending style.
//!
//!     Inline commands live in [`inline`], commands that change block structure in [`structure`].

pub mod inline;
pub mod structure;

use crate::error::EditError;
use crate::model::{Attributes, Block, BlockKind, Run, StyledDocument};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextPosition {
    pub block: usize,
    pub offset: usize,
}

impl TextPosition {
    pub fn new(block: usize, offset: usize) -> Self {
        TextPosition { block, offset }
    }
}

/// A selection inside one block. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub block: usize,
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(block: usize, start: usize, end: usize) -> Self {
        TextRange { block, start, end }
    }

    pub fn caret(position: TextPosition) -> Self {
        TextRange::new(position.block, position.offset, position.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn start_position(&self) -> TextPosition {
        TextPosition::new(self.block, self.start)
    }
}

/// Attributes chosen with a caret, held until text is typed at that caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStyle {
    pub at: TextPosition,
    pub attrs: Attributes,
}

impl StyledDocument {
    /// Styling the next text typed at [`PendingStyle::at`] will get.
    pub fn pending_style(&self) -> Option<&PendingStyle> {
        self.pending_style.as_ref()
    }

    /// Change the pending style at a caret, starting from what typing there would give.
    pub(crate) fn restyle_pending(
        &mut self,
        block: usize,
        offset: usize,
        f: impl FnOnce(&mut Attributes),
    ) {
        let at = TextPosition::new(block, offset);
        let mut attrs = match self.pending_style.take() {
            Some(pending) if pending.at == at => pending.attrs,
            _ => typing_attrs(&self.blocks[block], offset),
        };
        f(&mut attrs);
        log::trace!("pending style at {block}:{offset} is now {attrs:?}");
        self.pending_style = Some(PendingStyle { at, attrs });
    }

    /// Attributes for text typed at a caret, consuming a pending style chosen there.
    pub(crate) fn take_typing_attrs(&mut self, block: usize, offset: usize) -> Attributes {
        match self.pending_style.take() {
            Some(pending) if pending.at == TextPosition::new(block, offset) => pending.attrs,
            _ => typing_attrs(&self.blocks[block], offset),
        }
    }

    /// Reject text insertion into blocks whose only content is a table or a rule.
    pub(crate) fn check_holds_text(&self, block: usize) -> Result<(), EditError> {
        match self.checked_block(block)?.kind {
            BlockKind::Table(_) | BlockKind::HorizontalRule => {
                Err(EditError::NoTextContent(block))
            }
            _ => Ok(()),
        }
    }

    /// Check a range against the document and clamp it past any list marker.
    pub(crate) fn locate(&self, range: TextRange) -> Result<Range<usize>, EditError> {
        let block = self.blocks.get(range.block).ok_or(EditError::BlockOutOfRange {
            block: range.block,
            blocks: self.blocks.len(),
        })?;
        if range.start > range.end {
            return Err(EditError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        let text = block.text();
        for offset in [range.start, range.end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::InvalidOffset {
                    block: range.block,
                    offset,
                });
            }
        }
        let floor = block.content_start();
        Ok(range.start.max(floor)..range.end.max(floor))
    }

    pub(crate) fn checked_block(&self, block: usize) -> Result<&Block, EditError> {
        self.blocks.get(block).ok_or(EditError::BlockOutOfRange {
            block,
            blocks: self.blocks.len(),
        })
    }
}

/// Apply `f` to the attributes of every content run inside `span`.
pub(crate) fn restyle(block: &mut Block, span: Range<usize>, mut f: impl FnMut(&mut Attributes)) {
    if span.is_empty() {
        return;
    }
    block.split_at(span.start);
    block.split_at(span.end);
    let mut start = 0;
    for run in &mut block.runs {
        let end = start + run.len();
        if start >= span.start && end <= span.end && !run.attrs.list_marker {
            f(&mut run.attrs);
        }
        start = end;
    }
    block.normalize();
}

/// Attributes new text at `offset` picks up: those of the preceding character, never a link.
pub(crate) fn typing_attrs(block: &Block, offset: usize) -> Attributes {
    let preceding = (offset > block.content_start())
        .then(|| block.attrs_at(offset - 1))
        .flatten();
    match preceding {
        Some(attrs) => Attributes {
            link: None,
            list_marker: false,
            ..attrs.clone()
        },
        None => Attributes::base_for(block.heading_level()),
    }
}

/// Index of the run that starts exactly at `offset`, splitting a run if needed.
fn boundary_index(block: &mut Block, offset: usize) -> usize {
    block.split_at(offset);
    let mut start = 0;
    for (index, run) in block.runs.iter().enumerate() {
        if start >= offset {
            return index;
        }
        start += run.len();
    }
    block.runs.len()
}

/// Insert a text run. An image block with text next to its image is an ordinary line.
pub(crate) fn insert_run(block: &mut Block, offset: usize, run: Run) {
    let index = boundary_index(block, offset);
    block.runs.insert(index, run);
    block.normalize();
    if matches!(block.kind, BlockKind::Image { .. }) && block.runs.len() > 1 {
        block.kind = BlockKind::Plain;
    }
}

pub(crate) fn remove_span(block: &mut Block, span: Range<usize>) {
    if span.is_empty() {
        return;
    }
    let from = boundary_index(block, span.start);
    let to = boundary_index(block, span.end);
    block.runs.drain(from..to);
    block.normalize();
    settle_attachment_kind(block);
}

/// Attachment block kinds only hold while the block still has its attachment.
pub(crate) fn settle_attachment_kind(block: &mut Block) {
    let owns_attachment = block.runs.iter().any(Run::is_attachment);
    if !owns_attachment
        && matches!(
            block.kind,
            BlockKind::HorizontalRule | BlockKind::Table(_) | BlockKind::Image { .. }
        )
    {
        block.kind = BlockKind::Plain;
    }
}
