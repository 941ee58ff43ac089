//! The styled document model.
//!
//! Ownership is strictly top-down: a [`StyledDocument`] owns its [`Block`]s, each block owns its
//! [`Run`]s. Nothing points back up. A document is produced fresh by every parse, edited in place
//! by one owner, and replaced on the next parse.
//!
//! Invariants kept by the parser and the mutators:
//! - Runs partition their block's text: no gaps, no overlaps.
//! - A heading block carries its level on every run.
//! - A list item starts with its marker run (`"-\t"` or `"<index>.\t"`).
//! - Attachment runs always carry the Markdown they were parsed from.

pub mod attachment;
pub mod attributes;
pub mod document;

pub use attachment::{
    Attachment, ImagePreview, Preview, RulePreview, TablePreview, OBJECT_REPLACEMENT,
};
pub use attributes::{Attributes, HeadingLevel, LinkTarget};
pub use document::{
    normalize_runs, slice_runs, Block, BlockKind, ColumnAlignment, Run, StyledDocument, TableSpec,
};
