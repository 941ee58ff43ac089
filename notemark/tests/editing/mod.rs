//! Editing tests
//!
//! Sequences of editor commands applied to parsed notes, checked through the Markdown the
//! document saves back to.

mod session;
