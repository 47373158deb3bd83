//! Archive handling for DOCX packages
//!
//! A DOCX file is a ZIP archive of XML parts. `OoxmlArchive` holds the parts
//! in memory, keyed by their path inside the package.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};

use tracing::debug;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use crate::error::{OoxmlError, Result};

/// Path of the content-type manifest
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
/// Path of the package-level relationships
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";
/// Path of the main document part
pub const DOCUMENT_PATH: &str = "word/document.xml";
/// Path of the document-level relationships
pub const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
/// Path of the styles part
pub const STYLES_PATH: &str = "word/styles.xml";

/// An unpacked OOXML package
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OoxmlArchive {
    /// All parts in the archive, keyed by path (sorted for deterministic output)
    files: BTreeMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Read an archive from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Result<Option<&str>> {
        match self.files.get(path) {
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|_| OoxmlError::InvalidEncoding(path.to_string())),
            None => Ok(None),
        }
    }

    /// Get a required part as a string
    pub fn require_string(&self, path: &str) -> Result<&str> {
        self.get_string(path)?
            .ok_or_else(|| OoxmlError::MissingFile(path.to_string()))
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&str> {
        self.require_string(DOCUMENT_PATH)
    }

    /// Get the styles definition (word/styles.xml)
    pub fn styles_xml(&self) -> Result<&str> {
        self.require_string(STYLES_PATH)
    }

    /// Check if a part exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all part paths in sorted order
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the archive has no parts
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Set or update a part's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    /// Set a part's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Write the archive to any writer
    ///
    /// Every entry carries the same fixed timestamp, so equal parts always
    /// produce byte-identical archives.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        for (path, contents) in &self.files {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Write the archive into a fresh byte buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Cursor::new(Vec::new());
        self.write_to(&mut output)?;
        let bytes = output.into_inner();
        debug!(parts = self.files.len(), bytes = bytes.len(), "wrote archive");
        Ok(bytes)
    }
}
