//! md2docx-core - Markdown parsing
//!
//! Turns Markdown text into the ordered element sequence consumed by the
//! DOCX generator. Parsing never fails: anything the scanner does not
//! recognise degrades into plain paragraphs.
//!
//! # Example
//!
//! ```
//! use md2docx_ast::Element;
//! use md2docx_core::parse;
//!
//! let doc = parse("# Title\n\nSome **bold** text.\n");
//! assert_eq!(doc.len(), 2);
//! assert!(matches!(doc.elements[0], Element::Heading(_)));
//! ```

pub mod inline;
pub mod parser;

pub use inline::parse_inline;
pub use parser::parse;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
