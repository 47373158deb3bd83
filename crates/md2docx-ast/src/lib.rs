//! md2docx-ast - Document element definitions
//!
//! This crate provides the element types produced by the Markdown parser
//! and consumed by the DOCX generator. It has no knowledge of either side.

pub mod document;
pub mod element;
pub mod run;

pub use document::Document;
pub use element::{Element, Heading, List, Paragraph, Table, MAX_HEADING_LEVEL};
pub use run::Run;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
