//! Content-type manifest (`[Content_Types].xml`)
//!
//! Declares the MIME-like type of every part: by file extension through
//! `Default` entries and per part through `Override` entries.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::xml::{escape_xml, XML_DECLARATION};

/// OOXML namespace for the content-type manifest
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

impl ContentTypes {
    /// Relationship parts
    pub const RELATIONSHIPS: &'static str =
        "application/vnd.openxmlformats-package.relationships+xml";
    /// Generic XML parts
    pub const XML: &'static str = "application/xml";
    /// WordprocessingML main document
    pub const DOCUMENT_MAIN: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    /// WordprocessingML styles
    pub const STYLES: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
}

/// Ordered `Default` and `Override` declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// (extension, content type)
    defaults: Vec<(String, String)>,
    /// (part name, content type); part names start with `/`
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a content type for every part with the given extension
    pub fn add_default(&mut self, extension: impl Into<String>, content_type: impl Into<String>) {
        self.defaults.push((extension.into(), content_type.into()));
    }

    /// Declare a content type for a single part
    pub fn add_override(&mut self, part_name: impl Into<String>, content_type: impl Into<String>) {
        self.overrides.push((part_name.into(), content_type.into()));
    }

    /// Content type declared for an extension
    pub fn default_for(&self, extension: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, ct)| ct.as_str())
    }

    /// Content type declared for a part name (e.g. `/word/document.xml`)
    pub fn override_for(&self, part_name: &str) -> Option<&str> {
        self.overrides
            .iter()
            .find(|(name, _)| name == part_name)
            .map(|(_, ct)| ct.as_str())
    }

    /// Parse a manifest from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut manifest = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let local = e.local_name();
                    let is_default = local.as_ref() == b"Default";
                    let is_override = local.as_ref() == b"Override";

                    if is_default || is_override {
                        let mut key = None;
                        let mut content_type = None;
                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let Ok(value) = attr.unescape_value() else {
                                continue;
                            };
                            match attr.key.as_ref() {
                                b"Extension" | b"PartName" => key = Some(value.into_owned()),
                                b"ContentType" => content_type = Some(value.into_owned()),
                                _ => {}
                            }
                        }

                        if let (Some(key), Some(content_type)) = (key, content_type) {
                            if is_default {
                                manifest.add_default(key, content_type);
                            } else {
                                manifest.add_override(key, content_type);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(manifest)
    }

    /// Serialize to `[Content_Types].xml`
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
        xml.push('\n');

        for (extension, content_type) in &self.defaults {
            xml.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                escape_xml(extension),
                escape_xml(content_type)
            ));
        }
        for (part_name, content_type) in &self.overrides {
            xml.push_str(&format!(
                "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
                escape_xml(part_name),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docx_manifest() -> ContentTypes {
        let mut ct = ContentTypes::new();
        ct.add_default("rels", ContentTypes::RELATIONSHIPS);
        ct.add_default("xml", ContentTypes::XML);
        ct.add_override("/word/document.xml", ContentTypes::DOCUMENT_MAIN);
        ct.add_override("/word/styles.xml", ContentTypes::STYLES);
        ct
    }

    #[test]
    fn test_lookup() {
        let ct = docx_manifest();
        assert_eq!(ct.default_for("rels"), Some(ContentTypes::RELATIONSHIPS));
        assert_eq!(ct.override_for("/word/styles.xml"), Some(ContentTypes::STYLES));
        assert_eq!(ct.override_for("/word/numbering.xml"), None);
        assert_eq!(ct.default_for("png"), None);
    }

    #[test]
    fn test_to_xml_shape() {
        let xml = docx_manifest().to_xml();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(
            r#"<Default Extension="xml" ContentType="application/xml"/>"#
        ));
        assert!(xml.contains(r#"<Override PartName="/word/document.xml""#));
        assert!(xml.ends_with("</Types>"));
    }

    #[test]
    fn test_parse_written_manifest() {
        let ct = docx_manifest();
        let parsed = ContentTypes::parse(ct.to_xml().as_bytes()).unwrap();
        assert_eq!(parsed, ct);
    }
}
