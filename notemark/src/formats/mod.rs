//! Format implementations
//!
//! This module contains all format implementations that convert between
//! [`crate::model::StyledDocument`] and text representations. Markdown is the only
//! bidirectional format; the others are inspection dumps.

pub mod icons;
pub mod json;
pub mod markdown;
pub mod treeviz;

pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
