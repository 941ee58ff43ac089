//! Markdown serialization (StyledDocument → Markdown)
//!
//! One line per block. A block's prefix comes from its kind (`#` for headings, `- ` or `<n>. `
//! for list items), then the content runs are written with their markers. Attachments write
//! back the exact source they were parsed from.
//!
//! Markers are placed over spans, not runs: `**`/`***` open where bold starts and close where
//! it ends, `*` marks the italic stretches inside (or outside) a bold span, `<u>` wraps the
//! underlined stretches and `[..](target)` the runs sharing a link. Nesting, outermost first:
//!
//!     link → `**`/`***` → `*` → `<u>`
//!
//! Headings are bold by nature, so only their italic stretches are marked (as `***`).
//!
//! The inline grammar cannot express every combination of traits (bold nested inside an
//! italic span, for example). Each line is parsed back after it is written; when the result
//! differs from the runs that were asked for, the styling of the first diverging run is dropped
//! and the line is written again. The output is therefore always a fixed point: parsing it and
//! serializing the result gives the same Markdown.

use super::inline::{format_inline, split_image_source};
use crate::model::{
    normalize_runs, Attributes, Block, BlockKind, HeadingLevel, ImagePreview, LinkTarget,
    Preview, Run, StyledDocument,
};

const UNDERLINE_OPEN: &str = "<u>";
const UNDERLINE_CLOSE: &str = "</u>";

pub fn serialize_to_markdown(doc: &StyledDocument) -> String {
    let mut lines: Vec<String> = doc.blocks.iter().map(serialize_block).collect();
    while lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Markdown for a single block, without a line break.
pub fn serialize_block(block: &Block) -> String {
    if block.is_empty() {
        return String::new();
    }
    match &block.kind {
        BlockKind::Table(_) | BlockKind::HorizontalRule => attachment_sources(block),
        BlockKind::UnorderedListItem => {
            format!("- {}", serialize_runs(&list_content(block), Line::Body))
        }
        BlockKind::OrderedListItem { index } => {
            format!(
                "{index}. {}",
                serialize_runs(&list_content(block), Line::OrderedItem)
            )
        }
        _ => match block.heading_level() {
            Some(level) => format!(
                "{} {}",
                "#".repeat(usize::from(level.get())),
                serialize_runs(&block.runs, Line::Heading(level))
            ),
            None => serialize_runs(&block.runs, Line::Body),
        },
    }
}

fn list_content(block: &Block) -> Vec<Run> {
    block.runs_in(block.content_start()..block.len())
}

fn attachment_sources(block: &Block) -> String {
    let sources: String = block
        .runs
        .iter()
        .filter_map(|run| run.attachment.as_ref())
        .map(|attachment| attachment.source.as_str())
        .collect();
    if sources.is_empty() {
        serialize_runs(&block.runs, Line::Body)
    } else {
        sources
    }
}

/// Where a line's content ends up, which decides how the parser reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Plain paragraphs and unordered items: content is taken verbatim.
    Body,
    /// Ordered items: leading whitespace is eaten by the `<n>.` prefix.
    OrderedItem,
    /// Headings: bold base, leading spaces are eaten by the `#` prefix.
    Heading(HeadingLevel),
}

impl Line {
    fn base(self) -> Attributes {
        match self {
            Line::Heading(level) => Attributes::heading(level),
            Line::Body | Line::OrderedItem => Attributes::body(),
        }
    }

    fn trim_start(self, text: &str) -> &str {
        match self {
            Line::Body => text,
            Line::OrderedItem => text.trim_start(),
            Line::Heading(_) => text.trim_start_matches(' '),
        }
    }

    /// The runs as this line can hold them: list markers gone, attributes reduced to the ones
    /// Markdown carries, leading whitespace the prefix would swallow removed.
    fn canonical_runs(self, runs: &[Run]) -> Vec<Run> {
        let base = self.base();
        let runs = runs
            .iter()
            .filter(|run| !run.attrs.list_marker)
            .map(|run| {
                let link = run
                    .attrs
                    .link
                    .as_ref()
                    .map(|link| LinkTarget::parse(link.as_str()));
                let attrs = Attributes {
                    bold: base.bold || run.attrs.bold,
                    italic: run.attrs.italic,
                    underline: run.attrs.underline && link.is_none(),
                    link,
                    ..base.clone()
                };
                Run {
                    text: run.text.clone(),
                    attrs,
                    attachment: run.attachment.clone(),
                }
            })
            .collect();
        let mut runs = normalize_runs(runs);
        while let Some(first) = runs.first_mut() {
            if first.is_attachment() {
                break;
            }
            let eaten = first.text.len() - self.trim_start(&first.text).len();
            first.text.replace_range(..eaten, "");
            if !first.text.is_empty() {
                break;
            }
            runs.remove(0);
        }
        runs
    }

    /// Styling the line can drop: everything beyond its base attributes.
    fn is_styled(self, attrs: &Attributes) -> bool {
        let base = self.base();
        attrs.bold != base.bold || attrs.italic || attrs.underline || attrs.link.is_some()
    }

    fn unstyle(self, attrs: &mut Attributes) {
        let base = self.base();
        if attrs.bold != base.bold || attrs.italic || attrs.underline {
            attrs.bold = base.bold;
            attrs.italic = false;
            attrs.underline = false;
        } else {
            attrs.link = None;
        }
    }
}

/// Markdown for the content runs of one line.
pub fn serialize_runs(runs: &[Run], line: Line) -> String {
    let mut runs = line.canonical_runs(runs);
    loop {
        let markdown = encode(&runs, line);
        let reparsed = line.canonical_runs(&reparse(&markdown, &runs, line));
        let Some(diverged) = first_difference(&runs, &reparsed) else {
            return markdown;
        };
        log::trace!("{markdown:?} reads back differently from run {diverged}");
        if !drop_styling_near(&mut runs, diverged, line) {
            return markdown;
        }
        runs = normalize_runs(runs);
    }
}

fn reparse(markdown: &str, intended: &[Run], line: Line) -> Vec<Run> {
    let images = |path: &str| intended.iter().find_map(|run| image_preview(run, path));
    format_inline(line.trim_start(markdown), &line.base(), &images)
}

fn image_preview(run: &Run, path: &str) -> Option<ImagePreview> {
    let attachment = run.attachment.as_ref()?;
    let (_, source_path) = split_image_source(&attachment.source)?;
    match &attachment.preview {
        Preview::Image(preview) if source_path == path => Some(preview.clone()),
        _ => None,
    }
}

fn first_difference(intended: &[Run], reparsed: &[Run]) -> Option<usize> {
    let differs = intended
        .iter()
        .zip(reparsed)
        .position(|(a, b)| !same_run(a, b));
    differs.or_else(|| {
        (intended.len() != reparsed.len()).then(|| intended.len().min(reparsed.len()))
    })
}

fn same_run(a: &Run, b: &Run) -> bool {
    let same_attachment = match (&a.attachment, &b.attachment) {
        (Some(a), Some(b)) => a.source == b.source,
        (None, None) => true,
        _ => false,
    };
    a.text == b.text && a.attrs == b.attrs && same_attachment
}

/// Clear the styling of the run at `index`, or of the closest styled run before or after it.
/// Returns false when no run carries any styling.
fn drop_styling_near(runs: &mut [Run], index: usize, line: Line) -> bool {
    let Some(last) = runs.len().checked_sub(1) else {
        return false;
    };
    let index = index.min(last);
    let candidate = (0..=index)
        .rev()
        .chain(index + 1..runs.len())
        .find(|&i| line.is_styled(&runs[i].attrs));
    match candidate {
        Some(i) => {
            line.unstyle(&mut runs[i].attrs);
            true
        }
        None => false,
    }
}

/// Star marker around a bold span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strong {
    Bold,
    BoldItalic,
}

impl Strong {
    fn marker(self) -> &'static str {
        match self {
            Strong::Bold => "**",
            Strong::BoldItalic => "***",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Emphasis {
    strong: Option<Strong>,
    /// Marked with a single `*`.
    italic: bool,
}

/// Star markers for each run. A bold span that is italic throughout becomes one `***` span;
/// otherwise it is a `**` span with `*` around its italic stretches.
fn emphasis(runs: &[Run], line: Line) -> Vec<Emphasis> {
    if let Line::Heading(_) = line {
        return runs
            .iter()
            .map(|run| Emphasis {
                strong: run.attrs.italic.then_some(Strong::BoldItalic),
                italic: false,
            })
            .collect();
    }
    let mut out = Vec::with_capacity(runs.len());
    let mut start = 0;
    while start < runs.len() {
        if !runs[start].attrs.bold {
            out.push(Emphasis {
                strong: None,
                italic: runs[start].attrs.italic,
            });
            start += 1;
            continue;
        }
        let end = (start..runs.len())
            .find(|&i| !runs[i].attrs.bold)
            .unwrap_or(runs.len());
        let span = &runs[start..end];
        let italic_throughout = span.iter().all(|run| run.attrs.italic);
        out.extend(span.iter().map(|run| {
            if italic_throughout {
                Emphasis {
                    strong: Some(Strong::BoldItalic),
                    italic: false,
                }
            } else {
                Emphasis {
                    strong: Some(Strong::Bold),
                    italic: run.attrs.italic,
                }
            }
        }));
        start = end;
    }
    out
}

fn encode(runs: &[Run], line: Line) -> String {
    let emphasis = emphasis(runs, line);
    let mut out = String::new();
    for index in 0..=runs.len() {
        let before = index.checked_sub(1).map(|i| (&runs[i], emphasis[i]));
        let after = runs.get(index).map(|run| (run, emphasis[index]));
        write_boundary(&mut out, before, after);
        if let Some(run) = runs.get(index) {
            match &run.attachment {
                Some(attachment) => out.push_str(&attachment.source),
                None => out.push_str(&run.text),
            }
        }
    }
    out
}

/// Markers between two neighbouring runs (or a line edge): closers of the left run's spans,
/// then openers of the right run's spans.
fn write_boundary(
    out: &mut String,
    before: Option<(&Run, Emphasis)>,
    after: Option<(&Run, Emphasis)>,
) {
    let left = before.map(|(_, emphasis)| emphasis).unwrap_or_default();
    let right = after.map(|(_, emphasis)| emphasis).unwrap_or_default();
    let strong_changes = left.strong != right.strong;
    let italic_continues = left.italic && right.italic && !strong_changes;

    let mut closers: Vec<&str> = Vec::new();
    if left.italic && !italic_continues {
        closers.push("*");
    }
    if let Some(strong) = left.strong.filter(|_| strong_changes) {
        closers.push(strong.marker());
    }
    let mut openers: Vec<&str> = Vec::new();
    if let Some(strong) = right.strong.filter(|_| strong_changes) {
        openers.push(strong.marker());
    }
    if right.italic && !italic_continues {
        openers.push("*");
    }

    let underline_before = before.is_some_and(|(run, _)| run.attrs.underline);
    let underline_after = after.is_some_and(|(run, _)| run.attrs.underline);
    let tag = match (underline_before, underline_after) {
        (true, false) => Some(UNDERLINE_CLOSE),
        (false, true) => Some(UNDERLINE_OPEN),
        _ => None,
    };
    let left_link = before.and_then(|(run, _)| run.attrs.link.as_ref());
    let right_link = after.and_then(|(run, _)| run.attrs.link.as_ref());
    let link_changes = left_link != right_link;

    let mut stars = closers.clone();
    stars.extend(&openers);
    let split = closers.len();
    // `<u>` sits inside the star spans. When two star markers meet, it goes between them so
    // they never fuse into a longer marker.
    let tag_slot = match tag {
        Some(_) if !closers.is_empty() && !openers.is_empty() => split,
        Some(_) if stars.len() > 1 => 1,
        Some(UNDERLINE_CLOSE) => 0,
        _ => stars.len(),
    };

    for slot in 0..=stars.len() {
        if slot == split {
            if tag_slot == slot && tag == Some(UNDERLINE_CLOSE) {
                out.extend(tag);
            }
            if link_changes {
                write_link_edge(out, left_link, right_link);
            }
            if tag_slot == slot && tag != Some(UNDERLINE_CLOSE) {
                out.extend(tag);
            }
        } else if slot == tag_slot {
            out.extend(tag);
        }
        if let Some(marker) = stars.get(slot) {
            out.push_str(marker);
        }
    }
}

fn write_link_edge(out: &mut String, left: Option<&LinkTarget>, right: Option<&LinkTarget>) {
    if let Some(link) = left {
        out.push_str("](");
        out.push_str(link.as_str());
        out.push(')');
    }
    if right.is_some() {
        out.push('[');
    }
}
