//! Commands that change text or block structure: typing, deleting, splitting lines, headings
//! and list numbering.

use super::{insert_run, remove_span, settle_attachment_kind, TextPosition, TextRange};
use crate::error::EditError;
use crate::model::{Attributes, Block, BlockKind, HeadingLevel, Run, StyledDocument};

impl StyledDocument {
    /// Insert `text` at `position`. Returns the caret after the inserted text.
    ///
    /// The text takes the style of the character before it, or the pending style chosen at this
    /// caret. Tables and rules refuse text.
    pub fn insert_text(
        &mut self,
        position: TextPosition,
        text: &str,
    ) -> Result<TextPosition, EditError> {
        let span = self.locate(TextRange::caret(position))?;
        if text.contains('\n') {
            return Err(EditError::UnexpectedNewline);
        }
        self.check_holds_text(position.block)?;
        let attrs = self.take_typing_attrs(position.block, span.start);
        insert_run(&mut self.blocks[position.block], span.start, Run::text(text, attrs));
        Ok(TextPosition::new(position.block, span.start + text.len()))
    }

    /// Delete the range. Returns the caret where the text was.
    pub fn delete_range(&mut self, range: TextRange) -> Result<TextPosition, EditError> {
        let span = self.locate(range)?;
        self.pending_style = None;
        remove_span(&mut self.blocks[range.block], span.clone());
        Ok(TextPosition::new(range.block, span.start))
    }

    /// Split the block at `position`, continuing lists.
    ///
    /// A list item with nothing but whitespace after its marker loses the marker instead of being
    /// split. Returns the caret at the start of the new line's content.
    pub fn insert_newline(&mut self, position: TextPosition) -> Result<TextPosition, EditError> {
        let span = self.locate(TextRange::caret(position))?;
        self.pending_style = None;
        let offset = span.start;
        let block = &self.blocks[position.block];

        if block.is_list_item() && block.text()[block.content_start()..].trim().is_empty() {
            self.blocks[position.block] = Block::empty();
            return Ok(TextPosition::new(position.block, 0));
        }

        let head_runs = block.runs_in(0..offset);
        let tail_runs = block.runs_in(offset..block.len());
        let tail_has_text = tail_runs.iter().any(|run| !run.is_empty());

        let (tail_kind, marker) = match &block.kind {
            BlockKind::UnorderedListItem => (
                BlockKind::UnorderedListItem,
                Some(Run::text("-\t", Attributes::list_marker())),
            ),
            BlockKind::OrderedListItem { index } => {
                let next = index.saturating_add(1);
                (
                    BlockKind::OrderedListItem { index: next },
                    Some(Run::text(format!("{next}.\t"), Attributes::list_marker())),
                )
            }
            BlockKind::Heading { .. } if tail_has_text => (block.kind.clone(), None),
            BlockKind::Heading { .. } | BlockKind::Plain => (BlockKind::Plain, None),
            other => (other.clone(), None),
        };

        let caret = marker.as_ref().map(Run::len).unwrap_or(0);
        let mut head = Block::new(block.kind.clone(), head_runs);
        let mut tail = Block::new(tail_kind, marker.into_iter().chain(tail_runs).collect());
        settle_attachment_kind(&mut head);
        settle_attachment_kind(&mut tail);

        self.blocks[position.block] = head;
        self.blocks.insert(position.block + 1, tail);
        Ok(TextPosition::new(position.block + 1, caret))
    }

    /// Make the block a heading of `level`, or a plain line if it already is one.
    ///
    /// Bold and italic give way to the heading style; links and underline stay. List items drop
    /// their marker. Tables and rules cannot become headings and are left alone.
    pub fn toggle_heading(&mut self, block: usize, level: u8) -> Result<(), EditError> {
        let Some(level) = HeadingLevel::new(level) else {
            log::warn!("ignoring heading level {level}, expected 1..=6");
            return Err(EditError::InvalidHeadingLevel(level));
        };
        self.checked_block(block)?;
        self.pending_style = None;
        let target = &mut self.blocks[block];

        if matches!(target.kind, BlockKind::Table(_) | BlockKind::HorizontalRule) {
            log::debug!("block {block} cannot become a heading");
            return Ok(());
        }

        let base = if target.heading_level() == Some(level) {
            target.kind = BlockKind::Plain;
            Attributes::body()
        } else {
            if target.is_list_item() {
                let content_start = target.content_start();
                target.runs = target.runs_in(content_start..target.len());
            }
            target.kind = BlockKind::Heading { level };
            Attributes::heading(level)
        };
        for run in &mut target.runs {
            run.attrs = Attributes {
                link: run.attrs.link.take(),
                underline: run.attrs.underline,
                ..base.clone()
            };
        }
        target.normalize();
        Ok(())
    }

    /// Renumber an ordered list item.
    pub fn set_list_index(&mut self, block: usize, index: u64) -> Result<(), EditError> {
        self.checked_block(block)?;
        self.pending_style = None;
        let target = &mut self.blocks[block];
        let BlockKind::OrderedListItem { index: current } = &mut target.kind else {
            return Err(EditError::NotAnOrderedItem(block));
        };
        *current = index;
        if let Some(marker) = target.runs.first_mut().filter(|run| run.attrs.list_marker) {
            marker.text = format!("{index}.\t");
        }
        Ok(())
    }
}
