//! # md2docx-ooxml
//!
//! DOCX package generation for md2docx.
//!
//! This crate turns a parsed element sequence into a WordprocessingML
//! package: five XML parts (document, styles, two relationship files and
//! the content-type manifest) zipped into a single archive.
//!
//! ## Example
//!
//! ```
//! use md2docx_ast::{Element, Heading};
//! use md2docx_ooxml::{build, OoxmlArchive};
//!
//! let elements = vec![Element::Heading(Heading::new(1, "Hello"))];
//! let bytes = build(&elements)?;
//!
//! let archive = OoxmlArchive::from_reader(std::io::Cursor::new(bytes))?;
//! assert!(archive.document_xml()?.contains("Heading1"));
//! # Ok::<(), md2docx_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod content_types;
pub mod error;
pub mod relationships;
pub mod styles;
pub mod test_utils;
pub mod writer;
mod xml;

pub use archive::OoxmlArchive;
pub use content_types::ContentTypes;
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use styles::{HeadingStyles, StyleSheet};
pub use writer::{build, DocxWriter, WriterConfig};
pub use xml::escape_xml;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
