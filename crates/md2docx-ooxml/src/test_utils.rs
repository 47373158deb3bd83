//! Shared test utilities for md2docx-ooxml
//!
//! Fixtures and helpers used by the integration tests of this crate and of
//! the CLI.

use md2docx_ast::{Element, Heading, List, Paragraph, Run, Table};

use crate::archive::{
    OoxmlArchive, CONTENT_TYPES_PATH, DOCUMENT_PATH, DOCUMENT_RELS_PATH, PACKAGE_RELS_PATH,
    STYLES_PATH,
};
use crate::error::Result;

/// Every part a generated package contains, in archive order
pub const EXPECTED_PARTS: [&str; 5] = [
    CONTENT_TYPES_PATH,
    PACKAGE_RELS_PATH,
    DOCUMENT_RELS_PATH,
    DOCUMENT_PATH,
    STYLES_PATH,
];

/// One element of every kind
///
/// # Example
/// ```
/// use md2docx_ooxml::test_utils::sample_elements;
/// assert_eq!(sample_elements().len(), 5);
/// ```
pub fn sample_elements() -> Vec<Element> {
    vec![
        Element::Heading(Heading::new(1, "Title")),
        Element::Paragraph(Paragraph::new(vec![
            Run::plain("Plain "),
            Run::plain("bold").with_bold(true),
            Run::plain(" and "),
            Run::plain("code").with_code(true),
        ])),
        Element::List(List {
            ordered: true,
            items: vec!["one".to_string(), "two".to_string()],
        }),
        Element::List(List {
            ordered: false,
            items: vec!["dot".to_string()],
        }),
        Element::Table(Table {
            rows: vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ],
        }),
    ]
}

/// Unzip generated bytes back into parts
pub fn open_package(bytes: &[u8]) -> Result<OoxmlArchive> {
    OoxmlArchive::from_bytes(bytes)
}

/// Read one part of a generated package as text
pub fn extract_part(bytes: &[u8], path: &str) -> Result<String> {
    let archive = open_package(bytes)?;
    Ok(archive.require_string(path)?.to_string())
}

/// Sorted part paths of a generated package
pub fn part_names(bytes: &[u8]) -> Result<Vec<String>> {
    let archive = open_package(bytes)?;
    Ok(archive.file_list().map(str::to_string).collect())
}
