//! Inline formatting pipeline
//!
//!     Inline markup is resolved by a fixed sequence of passes. Each pass looks at the text of
//!     the runs produced so far (attachments count as one U+FFFC char), finds its matches
//!     leftmost-first, and rebuilds the run list left to right: untouched gaps are copied, each
//!     match is replaced by its inner runs with the pass's attribute applied.
//!
//!     Order matters. Images go first so their brackets are not mistaken for links, and
//!     bold-italic runs before bold so `***` is not split into `**` + `*`:
//!
//!         images → links → bold-italic → bold → italic → underline
//!
//!     A pass only adds its own attribute. Links, underline, heading levels and attachments on
//!     the inner runs survive. When a font trait has to be combined with an existing one (bold
//!     inside italic, italic inside bold) the existing trait is read from the first character of
//!     the match and applied to the whole match.

use crate::model::{
    normalize_runs, slice_runs, Attachment, Attributes, ImagePreview, LinkTarget, Preview, Run,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image pattern"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link pattern"));
static BOLD_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid bold-italic pattern"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));
static UNDERLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<u>(.+?)</u>").expect("valid underline pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlinePass {
    Images,
    Links,
    BoldItalic,
    Bold,
    Italic,
    Underline,
}

pub const PIPELINE: [InlinePass; 6] = [
    InlinePass::Images,
    InlinePass::Links,
    InlinePass::BoldItalic,
    InlinePass::Bold,
    InlinePass::Italic,
    InlinePass::Underline,
];

/// Loads the preview for an image path as written in the note.
pub type ImageLookup<'a> = dyn Fn(&str) -> Option<ImagePreview> + 'a;

/// Alt text and path of an image source like `![alt](path)`.
pub fn split_image_source(source: &str) -> Option<(&str, &str)> {
    let caps = IMAGE.captures(source)?;
    let whole = caps.get(0)?;
    if whole.range() != (0..source.len()) {
        return None;
    }
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Match {
    whole: Range<usize>,
    inner: Range<usize>,
    /// Link target or image path.
    target: Option<String>,
}

/// Run the whole pipeline over one line of content.
pub fn format_inline(text: &str, base: &Attributes, images: &ImageLookup<'_>) -> Vec<Run> {
    PIPELINE
        .iter()
        .fold(vec![Run::text(text, base.clone())], |runs, pass| {
            pass.apply(runs, images)
        })
}

impl InlinePass {
    pub fn apply(self, runs: Vec<Run>, images: &ImageLookup<'_>) -> Vec<Run> {
        let text: String = runs.iter().map(|run| run.text.as_str()).collect();
        let matches = self.find(&text);
        if matches.is_empty() {
            return runs;
        }
        log::trace!("{self:?}: {} match(es) in {text:?}", matches.len());

        let mut out = Vec::with_capacity(runs.len() + matches.len() * 2);
        let mut cursor = 0;
        for m in &matches {
            out.extend(slice_runs(&runs, cursor..m.whole.start));
            out.extend(self.replace(m, &runs, &text, images));
            cursor = m.whole.end;
        }
        out.extend(slice_runs(&runs, cursor..text.len()));
        normalize_runs(out)
    }

    fn find(self, text: &str) -> Vec<Match> {
        let pattern = match self {
            InlinePass::Images => &IMAGE,
            InlinePass::Links => &LINK,
            InlinePass::BoldItalic => &BOLD_ITALIC,
            InlinePass::Bold => &BOLD,
            InlinePass::Underline => &UNDERLINE,
            InlinePass::Italic => return find_italic_spans(text),
        };
        pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?.range();
                let inner = caps.get(1)?.range();
                let target = caps.get(2).map(|target| target.as_str().to_string());
                Some(Match {
                    whole,
                    inner,
                    target,
                })
            })
            .collect()
    }

    fn replace(self, m: &Match, runs: &[Run], text: &str, images: &ImageLookup<'_>) -> Vec<Run> {
        if self == InlinePass::Images {
            let source = &text[m.whole.clone()];
            let preview = m.target.as_deref().and_then(|path| images(path));
            return match preview {
                Some(preview) => {
                    let attrs = slice_runs(runs, m.whole.clone())
                        .first()
                        .map(|run| run.attrs.clone())
                        .unwrap_or_default();
                    let attachment = Attachment::new(source, Preview::Image(preview));
                    vec![Run::attachment(attachment, attrs)]
                }
                None => slice_runs(runs, m.whole.clone()),
            };
        }

        let mut inner = slice_runs(runs, m.inner.clone());
        let first = inner.first().map(|run| run.attrs.clone()).unwrap_or_default();
        for run in &mut inner {
            let attrs = &mut run.attrs;
            match self {
                InlinePass::Links => {
                    attrs.link = m.target.as_deref().map(LinkTarget::parse);
                }
                InlinePass::BoldItalic => {
                    attrs.bold = true;
                    attrs.italic = true;
                }
                InlinePass::Bold => {
                    attrs.bold = true;
                    attrs.italic = first.italic;
                }
                InlinePass::Italic => {
                    attrs.italic = true;
                    attrs.bold = first.bold;
                }
                InlinePass::Underline => attrs.underline = true,
                InlinePass::Images => {}
            }
        }
        inner
    }
}

/// Single-star emphasis: a `*` with no `*` on either side, at least one char, then another such
/// `*`. Shortest match wins, scanning left to right.
fn find_italic_spans(text: &str) -> Vec<Match> {
    let bytes = text.as_bytes();
    let lone_star = |at: usize| {
        bytes[at] == b'*'
            && (at == 0 || bytes[at - 1] != b'*')
            && bytes.get(at + 1) != Some(&b'*')
    };

    let mut spans = Vec::new();
    let mut open = 0;
    while open < bytes.len() {
        if !lone_star(open) {
            open += 1;
            continue;
        }
        match (open + 2..bytes.len()).find(|&close| lone_star(close)) {
            Some(close) => {
                spans.push(Match {
                    whole: open..close + 1,
                    inner: open + 1..close,
                    target: None,
                });
                open = close + 1;
            }
            None => break,
        }
    }
    spans
}
