//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ StyledDocument conversion.

mod export;
mod images;
mod import;
mod roundtrip;
mod table;
mod treeviz;
