//! Relationships for OOXML packages
//!
//! OOXML uses relationship files (`_rels/*.rels`) to map IDs to targets.
//! A package needs two of them: the root one pointing at the main document,
//! and the document one pointing at styles (and any hyperlinks).
//!
//! # Example
//!
//! ```
//! use md2docx_ooxml::Relationships;
//!
//! let mut rels = Relationships::new();
//! let id = rels.add("styles.xml", Relationships::TYPE_STYLES);
//! assert_eq!(id, "rId1");
//!
//! let xml = rels.to_xml();
//! assert!(xml.contains(r#"Target="styles.xml""#));
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{OoxmlError, Result};
use crate::xml::{escape_xml, XML_DECLARATION};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    /// Main document relationship type (package root to document)
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Hyperlink relationship type
    pub const TYPE_HYPERLINK: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

/// Target mode for targets outside the package
pub const TARGET_MODE_EXTERNAL: &str = "External";

/// One relationship entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g. `rId1`)
    pub id: String,
    /// The relationship type URI
    pub rel_type: String,
    /// The target URL or part path
    pub target: String,
    /// `External` for URLs, None for parts inside the package
    pub target_mode: Option<String>,
}

impl Relationship {
    /// Read a `<Relationship>` element's attributes
    fn from_element(e: &BytesStart<'_>) -> Option<Self> {
        let mut rel = Relationship {
            id: String::new(),
            rel_type: String::new(),
            target: String::new(),
            target_mode: None,
        };

        for attr in e.attributes().flatten() {
            let Ok(value) = attr.unescape_value() else {
                continue;
            };
            let slot = match attr.key.as_ref() {
                b"Id" => &mut rel.id,
                b"Type" => &mut rel.rel_type,
                b"Target" => &mut rel.target,
                b"TargetMode" => rel.target_mode.insert(String::new()),
                _ => continue,
            };
            *slot = value.into_owned();
        }

        (!rel.id.is_empty() && !rel.target.is_empty()).then_some(rel)
    }
}

/// An ordered relationships file
///
/// Entries keep insertion order for deterministic XML serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationships {
    entries: Vec<Relationship>,
    /// Number used for the next `rIdN`
    next_id_counter: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id_counter: 1,
        }
    }
}

impl Relationships {
    /// Create an empty relationships file
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an internal relationship and return the generated ID
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        self.push(target.into(), rel_type.into(), None)
    }

    /// Add an external hyperlink relationship and return the generated ID
    pub fn add_hyperlink(&mut self, url: impl Into<String>) -> String {
        self.push(
            url.into(),
            Self::TYPE_HYPERLINK.to_string(),
            Some(TARGET_MODE_EXTERNAL.to_string()),
        )
    }

    fn push(&mut self, target: String, rel_type: String, target_mode: Option<String>) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;

        debug!(%id, %target, "allocated relationship");
        self.entries.push(Relationship {
            id: id.clone(),
            rel_type,
            target,
            target_mode,
        });
        id
    }

    /// Parse relationships from XML bytes
    ///
    /// Entries without an `Id` or `Target` are skipped. New IDs continue
    /// after the highest numeric ID found.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf).map_err(OoxmlError::Xml)? {
                Event::Eof => break,
                Event::Empty(ref e) | Event::Start(ref e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    if let Some(rel) = Relationship::from_element(e) {
                        let n = extract_id_number(&rel.id).unwrap_or(0);
                        rels.next_id_counter = rels.next_id_counter.max(n + 1);
                        rels.entries.push(rel);
                    }
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Serialize relationships to OOXML format
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for rel in &self.entries {
            xml.push_str("  <Relationship");
            xml.push_str(&format!(r#" Id="{}""#, escape_xml(&rel.id)));
            xml.push_str(&format!(r#" Type="{}""#, escape_xml(&rel.rel_type)));
            xml.push_str(&format!(r#" Target="{}""#, escape_xml(&rel.target)));
            if let Some(mode) = &rel.target_mode {
                xml.push_str(&format!(r#" TargetMode="{}""#, escape_xml(mode)));
            }
            xml.push_str("/>\n");
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Get the entry for a relationship ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Find the first entry of a given type
    pub fn find_by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.rel_type == rel_type)
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract the numeric portion from a relationship ID (e.g., "rId5" -> 5)
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId").and_then(|num| num.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add("word/document.xml", Relationships::TYPE_OFFICE_DOCUMENT), "rId1");
        assert_eq!(rels.add_hyperlink("https://example.com"), "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_hyperlink_is_external() {
        let mut rels = Relationships::new();
        let id = rels.add_hyperlink("https://example.com/?a=1&b=2");
        let rel = rels.get(&id).unwrap();
        assert_eq!(rel.target_mode.as_deref(), Some(TARGET_MODE_EXTERNAL));

        let xml = rels.to_xml();
        assert!(xml.contains(r#"TargetMode="External""#));
        assert!(xml.contains("a=1&amp;b=2"));
    }

    #[test]
    fn test_to_xml_then_parse() {
        let mut rels = Relationships::new();
        rels.add("styles.xml", Relationships::TYPE_STYLES);
        rels.add_hyperlink("http://x");

        let parsed = Relationships::parse(rels.to_xml().as_bytes()).unwrap();
        assert_eq!(parsed, rels);
    }

    #[test]
    fn test_parse_continues_numbering() {
        let xml = br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId7" Type="t" Target="a.xml"/>
</Relationships>"#;
        let mut rels = Relationships::parse(xml).unwrap();
        assert_eq!(rels.add("b.xml", "t"), "rId8");
    }

    #[test]
    fn test_find_by_type() {
        let mut rels = Relationships::new();
        rels.add("styles.xml", Relationships::TYPE_STYLES);
        let styles = rels.find_by_type(Relationships::TYPE_STYLES).unwrap();
        assert_eq!(styles.target, "styles.xml");
        assert!(rels.find_by_type(Relationships::TYPE_HYPERLINK).is_none());
    }
}
