//! Markdown notes ↔ styled documents
//!
//!     This crate converts the notes app's Markdown dialect into a [`StyledDocument`] (blocks of
//!     attributed runs, ready for a rich text view) and back. The conversion is deterministic and
//!     order preserving, and serializing a parsed note gives back canonical Markdown.
//!
//!     This is a pure lib, that is, it powers the notemark cli but is shell agnostic: no code
//!     here prints, reads env vars or decides where notes live. The one piece of I/O, reading
//!     image headers, sits behind [`ImageLoader`] and is off unless a caller plugs in
//!     [`FsImageLoader`].
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError, EditError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── model                   # StyledDocument, Block, Run, Attributes, attachments
//!     ├── style.rs                # Theme: attributes → fonts, colors, paragraph spacing
//!     ├── edit                    # In-place formatting commands on a StyledDocument
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Block rules
//!     │   │   ├── inline.rs       # Inline pass pipeline
//!     │   │   ├── table.rs        # Pipe tables
//!     │   │   ├── images.rs       # Image path resolution and loading
//!     │   │   └── serializer.rs
//!     │   ├── json                # Serialize-only model dump
//!     │   └── treeviz             # Serialize-only tree view
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common              # Fixture helpers
//!     ├── editing             # Command sequences on parsed notes
//!     ├── markdown            # Import, export, tables, images, round trip, treeviz
//!     │   └── <testname>.rs
//!     └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     Parsing is line oriented with a fixed rule order per line, followed by an ordered pipeline
//!     of inline passes (see formats/markdown/inline.rs). Serializing walks blocks and places
//!     markers over spans of runs sharing a trait, then reads each line back and drops whatever
//!     styling the inline grammar cannot carry. Tables, rules and images are stored as attachments that keep
//!     their Markdown source, which is what makes them round trip byte for byte.

pub mod edit;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;
pub mod style;

pub use edit::{TextPosition, TextRange};
pub use error::{EditError, FormatError};
pub use format::Format;
pub use formats::markdown::images::{FsImageLoader, ImageLoader, MemoryImages, NoImages};
pub use formats::markdown::parser::{ParseOptions, Parser};
pub use model::{Attributes, Block, BlockKind, HeadingLevel, LinkTarget, Run, StyledDocument};
pub use registry::FormatRegistry;
pub use style::Theme;

/// Parse notes Markdown with default options. Never fails.
pub fn parse(markdown: &str) -> StyledDocument {
    formats::markdown::parser::parse_from_markdown(markdown)
}

/// Serialize a document to canonical notes Markdown. Never fails.
pub fn serialize(document: &StyledDocument) -> String {
    formats::markdown::serializer::serialize_to_markdown(document)
}
