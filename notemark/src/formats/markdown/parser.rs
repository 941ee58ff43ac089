//! Markdown parsing (Markdown → StyledDocument)
//!
//! Line oriented: every source line becomes one block, except that a table swallows its whole
//! group of lines. Block rules are tried in order and the first that matches wins:
//!
//!     empty → table → heading → rule → ordered item → unordered item → plain
//!
//! Parsing never fails. Anything that does not match a rule is plain text, and inline markup
//! that does not close stays literal.

use super::images::{fit_width, resolve_image_path, ImageLoader, NoImages};
use super::inline::{format_inline, split_image_source};
use super::table::{table_extent, table_preview, table_spec};
use crate::model::{
    Attachment, Attributes, Block, BlockKind, HeadingLevel, ImagePreview, Preview, RulePreview,
    Run, StyledDocument,
};
use crate::style::Theme;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading pattern"));
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s+(.+)$").expect("valid ordered item pattern"));

pub const RULE_SOURCE: &str = "---";
pub const UNORDERED_PREFIX: &str = "- ";

/// Settings for a [`Parser`].
///
/// The default options never touch the file system: images are not loaded and stay as
/// Markdown text.
pub struct ParseOptions {
    pub theme: Theme,
    /// Base directory for relative image paths.
    pub notes_root: PathBuf,
    /// Expansion of a leading `~` in image paths.
    pub home_dir: Option<PathBuf>,
    pub image_loader: Box<dyn ImageLoader>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            theme: Theme::default(),
            notes_root: PathBuf::from("notes"),
            home_dir: None,
            image_loader: Box::new(NoImages),
        }
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("theme", &self.theme)
            .field("notes_root", &self.notes_root)
            .field("home_dir", &self.home_dir)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse(&self, markdown: &str) -> StyledDocument {
        let lines: Vec<&str> = markdown.split('\n').collect();
        let mut blocks = Vec::with_capacity(lines.len());
        let mut i = 0;
        while i < lines.len() {
            let extent = table_extent(&lines[i..]);
            if extent > 0 {
                blocks.push(self.table_block(&lines[i..i + extent]));
                i += extent;
            } else {
                blocks.push(self.line_block(lines[i]));
                i += 1;
            }
        }
        StyledDocument::new(blocks)
    }

    fn line_block(&self, line: &str) -> Block {
        if line.is_empty() {
            return Block::empty();
        }
        if let Some((level, content)) = parse_heading(line) {
            let runs = self.inline(content, &Attributes::heading(level));
            return Block::new(BlockKind::Heading { level }, runs);
        }
        if line == RULE_SOURCE {
            return self.rule_block();
        }
        if let Some((index, content)) = parse_ordered_item(line) {
            let mut runs = vec![Run::text(format!("{index}.\t"), Attributes::list_marker())];
            runs.extend(self.inline(content, &Attributes::body()));
            return Block::new(BlockKind::OrderedListItem { index }, runs);
        }
        if let Some(content) = line.strip_prefix(UNORDERED_PREFIX) {
            let mut runs = vec![Run::text("-\t", Attributes::list_marker())];
            runs.extend(self.inline(content, &Attributes::body()));
            return Block::new(BlockKind::UnorderedListItem, runs);
        }

        let runs = self.inline(line, &Attributes::body());
        let kind = match runs.as_slice() {
            [only] => standalone_image(only).unwrap_or(BlockKind::Plain),
            _ => BlockKind::Plain,
        };
        Block::new(kind, runs)
    }

    fn table_block(&self, lines: &[&str]) -> Block {
        let spec = table_spec(lines);
        log::debug!(
            "table: {} column(s), {} row(s)",
            spec.header.len(),
            spec.rows.len()
        );
        let preview = table_preview(&spec, &self.options.theme);
        let attachment = Attachment::new(lines.join("\n"), Preview::Table(preview));
        Block::new(
            BlockKind::Table(spec),
            vec![Run::attachment(attachment, Attributes::body())],
        )
    }

    fn rule_block(&self) -> Block {
        let theme = &self.options.theme;
        let preview = Preview::Rule(RulePreview {
            width: theme.rule_width,
            height: theme.rule_height,
        });
        Block::new(
            BlockKind::HorizontalRule,
            vec![Run::attachment(
                Attachment::new(RULE_SOURCE, preview),
                Attributes::body(),
            )],
        )
    }

    fn inline(&self, text: &str, base: &Attributes) -> Vec<Run> {
        format_inline(text, base, &|path: &str| self.load_image(path))
    }

    fn load_image(&self, path: &str) -> Option<ImagePreview> {
        let resolved = resolve_image_path(
            path,
            &self.options.notes_root,
            self.options.home_dir.as_deref(),
        );
        match self.options.image_loader.load(&resolved) {
            Some(preview) => Some(fit_width(preview, self.options.theme.image_max_width)),
            None => {
                log::debug!("image {path:?} left as text");
                None
            }
        }
    }
}

/// Heading level and content. Content has its leading spaces dropped and must not be empty.
fn parse_heading(line: &str) -> Option<(HeadingLevel, &str)> {
    let caps = HEADING.captures(line)?;
    let hashes = caps.get(1)?.as_str();
    let level = HeadingLevel::new(hashes.len() as u8)?;
    let content = line[hashes.len()..].trim_start_matches(' ');
    (!content.is_empty()).then_some((level, content))
}

fn parse_ordered_item(line: &str) -> Option<(u64, &str)> {
    let caps = ORDERED_ITEM.captures(line)?;
    let index = caps.get(1)?.as_str().parse().ok()?;
    Some((index, caps.get(2)?.as_str()))
}

fn standalone_image(run: &Run) -> Option<BlockKind> {
    let attachment = run.attachment.as_ref()?;
    if !matches!(attachment.preview, Preview::Image(_)) || run.attrs.link.is_some() {
        return None;
    }
    let (alt, path) = split_image_source(&attachment.source)?;
    Some(BlockKind::Image {
        alt: alt.to_string(),
        path: path.to_string(),
    })
}

/// Parse with default options.
pub fn parse_from_markdown(source: &str) -> StyledDocument {
    Parser::default().parse(source)
}
