//! Character formatting commands: bold, italic, underline, reset and links.

use super::{insert_run, remove_span, restyle, typing_attrs, TextRange};
use crate::error::EditError;
use crate::model::{Attributes, BlockKind, LinkTarget, Run, StyledDocument};

impl StyledDocument {
    /// Flip bold on each run of the range independently, keeping italic as it was.
    ///
    /// With an empty range, flips bold for the text typed next at the caret.
    pub fn toggle_bold(&mut self, range: TextRange) -> Result<(), EditError> {
        self.toggle_trait(range, |attrs| attrs.bold = !attrs.bold)
    }

    /// Flip italic on each run of the range independently, keeping bold as it was.
    ///
    /// With an empty range, flips italic for the text typed next at the caret.
    pub fn toggle_italic(&mut self, range: TextRange) -> Result<(), EditError> {
        self.toggle_trait(range, |attrs| attrs.italic = !attrs.italic)
    }

    /// Set or clear underline across the whole range, decided by its first character.
    pub fn toggle_underline(&mut self, range: TextRange) -> Result<(), EditError> {
        let span = self.locate(range)?;
        if span.is_empty() {
            self.restyle_pending(range.block, span.start, |attrs| {
                attrs.underline = !attrs.underline
            });
            return Ok(());
        }
        self.pending_style = None;
        let block = &mut self.blocks[range.block];
        let underline = !block
            .attrs_at(span.start)
            .map(|attrs| attrs.underline)
            .unwrap_or(false);
        restyle(block, span, |attrs| attrs.underline = underline);
        Ok(())
    }

    fn toggle_trait(
        &mut self,
        range: TextRange,
        flip: impl Fn(&mut Attributes),
    ) -> Result<(), EditError> {
        let span = self.locate(range)?;
        if span.is_empty() {
            self.restyle_pending(range.block, span.start, flip);
            return Ok(());
        }
        self.pending_style = None;
        restyle(&mut self.blocks[range.block], span, flip);
        Ok(())
    }

    /// Strip bold, italic, underline and links from the range.
    ///
    /// With an empty range the whole block is reset, and a heading turns back into a plain line.
    pub fn reset_to_normal(&mut self, range: TextRange) -> Result<(), EditError> {
        let span = self.locate(range)?;
        self.pending_style = None;
        let block = &mut self.blocks[range.block];
        if span.is_empty() {
            if matches!(block.kind, BlockKind::Heading { .. }) {
                block.kind = BlockKind::Plain;
            }
            let whole = block.content_start()..block.len();
            restyle(block, whole, |attrs| *attrs = Attributes::body());
        } else {
            restyle(block, span, |attrs| *attrs = attrs.plain());
        }
        Ok(())
    }

    /// Make the range a link to `target`.
    ///
    /// With an empty range the target itself is inserted as the link text. Returns the range the
    /// link now covers. Targets containing `)` and link text containing `]` have no Markdown
    /// spelling and are rejected.
    pub fn set_link(&mut self, range: TextRange, target: &str) -> Result<TextRange, EditError> {
        let span = self.locate(range)?;
        check_link_target(target)?;
        let link = LinkTarget::parse(target);
        if !span.is_empty() {
            check_link_text(&self.blocks[range.block].text()[span.clone()])?;
            self.pending_style = None;
            let block = &mut self.blocks[range.block];
            restyle(block, span.clone(), |attrs| attrs.link = Some(link.clone()));
            return Ok(TextRange::new(range.block, span.start, span.end));
        }
        check_link_text(target)?;
        self.check_holds_text(range.block)?;
        let attrs = Attributes {
            link: Some(link),
            ..self.take_typing_attrs(range.block, span.start)
        };
        insert_run(&mut self.blocks[range.block], span.start, Run::text(target, attrs));
        Ok(TextRange::new(
            range.block,
            span.start,
            span.start + target.len(),
        ))
    }

    /// Point the link over `range` at `new_url`, and replace its text with `new_title` when that
    /// is non-empty and different. The new text takes the attributes of the range's first
    /// character. Returns the range the link now covers.
    pub fn update_link(
        &mut self,
        range: TextRange,
        new_url: &str,
        new_title: &str,
    ) -> Result<TextRange, EditError> {
        let span = self.locate(range)?;
        if new_title.contains('\n') {
            return Err(EditError::UnexpectedNewline);
        }
        check_link_target(new_url)?;
        let current = self.blocks[range.block].text()[span.clone()].to_string();
        let retitled = !new_title.is_empty() && new_title != current;
        if retitled {
            check_link_text(new_title)?;
            self.check_holds_text(range.block)?;
        } else {
            check_link_text(&current)?;
        }

        self.pending_style = None;
        let block = &mut self.blocks[range.block];
        let link = LinkTarget::parse(new_url);
        restyle(block, span.clone(), |attrs| attrs.link = Some(link.clone()));
        if !retitled {
            return Ok(TextRange::new(range.block, span.start, span.end));
        }

        let attrs = match block.attrs_at(span.start) {
            Some(attrs) if !span.is_empty() => attrs.clone(),
            _ => Attributes {
                link: Some(link),
                ..typing_attrs(block, span.start)
            },
        };
        remove_span(block, span.clone());
        insert_run(block, span.start, Run::text(new_title, attrs));
        Ok(TextRange::new(
            range.block,
            span.start,
            span.start + new_title.len(),
        ))
    }
}

/// `[text](target)` ends at the first `)`, so a target cannot contain one.
fn check_link_target(target: &str) -> Result<(), EditError> {
    if target.is_empty() || target.contains([')', '\n']) {
        return Err(EditError::InvalidLinkTarget(target.to_string()));
    }
    Ok(())
}

fn check_link_text(text: &str) -> Result<(), EditError> {
    if text.contains(']') {
        return Err(EditError::InvalidLinkText(text.to_string()));
    }
    Ok(())
}
