//! DOCX Writer
//!
//! This module writes a parsed element sequence to a DOCX package. The
//! package always consists of the same five parts; only `word/document.xml`
//! (and, with hyperlinks enabled, the document relationships) depend on the
//! input.
//!
//! # Example
//!
//! ```
//! use md2docx_ast::{Element, List};
//! use md2docx_ooxml::DocxWriter;
//!
//! let elements = vec![Element::List(List {
//!     ordered: true,
//!     items: vec!["first".into(), "second".into()],
//! })];
//! let bytes = DocxWriter::new().build(&elements)?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), md2docx_ooxml::OoxmlError>(())
//! ```

use md2docx_ast::{Document, Element, Heading, List, Paragraph, Run, Table};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archive::{
    OoxmlArchive, CONTENT_TYPES_PATH, DOCUMENT_PATH, DOCUMENT_RELS_PATH, PACKAGE_RELS_PATH,
    STYLES_PATH,
};
use crate::content_types::ContentTypes;
use crate::error::Result;
use crate::relationships::Relationships;
use crate::styles::{heading_style_id, HeadingStyles, StyleSheet, WORDPROCESSINGML_NS};
use crate::xml::{escape_xml, XML_DECLARATION};

/// OOXML namespace for relationship references inside parts
const OFFICE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Numbering ID referenced by ordered list items
pub const ORDERED_NUM_ID: u32 = 1;
/// Numbering ID referenced by unordered list items
pub const UNORDERED_NUM_ID: u32 = 2;

/// Fixed table column width in twentieths of a point
const TABLE_COLUMN_WIDTH: u32 = 2000;

/// US Letter, in twentieths of a point
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
/// One inch
const PAGE_MARGIN: u32 = 1440;
/// Half an inch
const HEADER_FOOTER_DISTANCE: u32 = 720;

/// Border applied to every table edge and gridline
const TABLE_BORDER: &str = r#"w:val="single" w:sz="4" w:space="0" w:color="000000""#;

/// Generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Font declared on code runs
    pub code_font: String,
    /// Which heading levels get a style definition
    pub heading_styles: HeadingStyles,
    /// Emit link runs as clickable hyperlinks
    pub hyperlinks: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            code_font: "Courier New".to_string(),
            heading_styles: HeadingStyles::All,
            hyperlinks: false,
        }
    }
}

/// DOCX Writer for generating DOCX packages from parsed elements
pub struct DocxWriter {
    /// XML output buffer for word/document.xml
    output: String,
    /// Document relationships (word/_rels/document.xml.rels)
    relationships: Relationships,
    styles: StyleSheet,
    config: WriterConfig,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    /// Create a new DocxWriter with default options
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    /// Create a new DocxWriter with the given options
    pub fn with_config(config: WriterConfig) -> Self {
        let mut relationships = Relationships::new();
        relationships.add("styles.xml", Relationships::TYPE_STYLES);
        Self {
            output: String::new(),
            relationships,
            styles: StyleSheet::new(config.heading_styles),
            config,
        }
    }

    /// Generate a DOCX file from a parsed `Document`
    pub fn generate(doc: &Document) -> Result<Vec<u8>> {
        Self::new().build(doc.as_slice())
    }

    /// Build the DOCX package and return the archive bytes
    pub fn build(self, elements: &[Element]) -> Result<Vec<u8>> {
        self.build_archive(elements).to_bytes()
    }

    /// Build the DOCX package without zipping it
    pub fn build_archive(mut self, elements: &[Element]) -> OoxmlArchive {
        let document_xml = self.generate_document_xml(elements);
        let styles_xml = self.styles.to_xml();

        let mut archive = OoxmlArchive::new();
        archive.set_string(CONTENT_TYPES_PATH, content_types().to_xml());
        archive.set_string(PACKAGE_RELS_PATH, package_relationships().to_xml());
        archive.set_string(DOCUMENT_RELS_PATH, self.relationships.to_xml());
        archive.set_string(DOCUMENT_PATH, document_xml);
        archive.set_string(STYLES_PATH, styles_xml);

        debug!(
            elements = elements.len(),
            relationships = self.relationships.len(),
            "built docx package"
        );
        archive
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, elements: &[Element]) -> String {
        self.output.clear();

        self.output.push_str(XML_DECLARATION);
        self.output.push('\n');
        self.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n",
            WORDPROCESSINGML_NS, OFFICE_RELATIONSHIPS_NS
        ));
        self.output.push_str("<w:body>\n");

        for element in elements {
            self.generate_element(element);
        }

        self.generate_section_properties();

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    fn generate_element(&mut self, element: &Element) {
        match element {
            Element::Heading(heading) => self.generate_heading(heading),
            Element::Paragraph(para) => self.generate_paragraph(para),
            Element::List(list) => self.generate_list(list),
            Element::Table(table) => self.generate_table(table),
        }
    }

    /// Generate XML for a heading
    fn generate_heading(&mut self, heading: &Heading) {
        if !self.styles.defines_heading(heading.level) {
            debug!(
                level = heading.level,
                "no style defined for heading level, renders as Normal"
            );
        }
        self.output.push_str("<w:p>\n");
        self.output.push_str("<w:pPr>\n");
        self.output.push_str(&format!(
            "<w:pStyle w:val=\"{}\"/>\n",
            heading_style_id(heading.level)
        ));
        self.output.push_str("</w:pPr>\n");
        self.push_text_run(&heading.text);
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a paragraph
    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>\n");
        for run in &para.runs {
            self.generate_run(run);
        }
        self.output.push_str("</w:p>\n");
    }

    /// Generate one paragraph per list item
    fn generate_list(&mut self, list: &List) {
        let num_id = if list.ordered {
            ORDERED_NUM_ID
        } else {
            UNORDERED_NUM_ID
        };

        for item in &list.items {
            self.output.push_str("<w:p>\n");
            self.output.push_str("<w:pPr>\n");
            self.output.push_str("<w:numPr>\n");
            self.output.push_str("<w:ilvl w:val=\"0\"/>\n");
            self.output.push_str(&format!("<w:numId w:val=\"{}\"/>\n", num_id));
            self.output.push_str("</w:numPr>\n");
            self.output.push_str("</w:pPr>\n");
            self.push_text_run(item);
            self.output.push_str("</w:p>\n");
        }
    }

    /// Generate XML for a table
    fn generate_table(&mut self, table: &Table) {
        // A table needs at least one row
        if table.rows.is_empty() {
            self.output.push_str("<w:p/>\n");
            return;
        }

        self.output.push_str("<w:tbl>\n");

        self.output.push_str("<w:tblPr>\n");
        self.output.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/>\n");
        self.output.push_str("<w:tblBorders>\n");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.output.push_str(&format!("<w:{} {}/>\n", edge, TABLE_BORDER));
        }
        self.output.push_str("</w:tblBorders>\n");
        self.output.push_str("</w:tblPr>\n");

        self.output.push_str("<w:tblGrid>\n");
        for _ in 0..table.column_count().max(1) {
            self.output.push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", TABLE_COLUMN_WIDTH));
        }
        self.output.push_str("</w:tblGrid>\n");

        for row in &table.rows {
            self.output.push_str("<w:tr>\n");
            for cell in row {
                self.generate_table_cell(Some(cell));
            }
            // Ensure at least one cell in row
            if row.is_empty() {
                self.generate_table_cell(None);
            }
            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
    }

    fn generate_table_cell(&mut self, text: Option<&str>) {
        self.output.push_str("<w:tc>\n");
        self.output.push_str("<w:tcPr>\n");
        self.output.push_str(&format!(
            "<w:tcW w:w=\"{}\" w:type=\"dxa\"/>\n",
            TABLE_COLUMN_WIDTH
        ));
        self.output.push_str("</w:tcPr>\n");
        match text {
            Some(text) => {
                self.output.push_str("<w:p>\n");
                self.push_text_run(text);
                self.output.push_str("</w:p>\n");
            }
            None => self.output.push_str("<w:p/>\n"),
        }
        self.output.push_str("</w:tc>\n");
    }

    /// Fixed US Letter page with one-inch margins
    fn generate_section_properties(&mut self) {
        self.output.push_str("<w:sectPr>\n");
        self.output.push_str(&format!(
            "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>\n",
            PAGE_WIDTH, PAGE_HEIGHT
        ));
        self.output.push_str(&format!(
            "<w:pgMar w:top=\"{m}\" w:right=\"{m}\" w:bottom=\"{m}\" w:left=\"{m}\" \
             w:header=\"{hf}\" w:footer=\"{hf}\" w:gutter=\"0\"/>\n",
            m = PAGE_MARGIN,
            hf = HEADER_FOOTER_DISTANCE
        ));
        self.output.push_str("</w:sectPr>\n");
    }

    /// Generate XML for a formatted run
    fn generate_run(&mut self, run: &Run) {
        let hyperlink_id = match (&run.link, self.config.hyperlinks) {
            (Some(url), true) => Some(self.relationships.add_hyperlink(url.as_str())),
            _ => None,
        };

        if let Some(id) = &hyperlink_id {
            self.output.push_str(&format!("<w:hyperlink r:id=\"{}\">\n", escape_xml(id)));
        }

        self.output.push_str("<w:r>\n");
        if run.is_formatted() || hyperlink_id.is_some() {
            self.output.push_str("<w:rPr>\n");
            self.output.push_str(&run_properties(
                run,
                &self.config.code_font,
                hyperlink_id.is_some(),
            ));
            self.output.push_str("</w:rPr>\n");
        }
        self.push_text(&run.text);
        self.output.push_str("</w:r>\n");

        if hyperlink_id.is_some() {
            self.output.push_str("</w:hyperlink>\n");
        }
    }

    /// A run of unformatted text
    fn push_text_run(&mut self, text: &str) {
        self.output.push_str("<w:r>\n");
        self.push_text(text);
        self.output.push_str("</w:r>\n");
    }

    /// Text nodes for a run; line breaks become `w:br`
    fn push_text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.output.push_str("<w:br/>\n");
            }
            self.output.push_str(&format!(
                "<w:t xml:space=\"preserve\">{}</w:t>\n",
                escape_xml(line)
            ));
        }
    }
}

/// Run property markers, in schema order
fn run_properties(run: &Run, code_font: &str, hyperlink: bool) -> String {
    let mut props = String::new();
    if run.code {
        let font = escape_xml(code_font);
        props.push_str(&format!(
            "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\"/>\n",
            font, font
        ));
    }
    if run.bold {
        props.push_str("<w:b/>\n");
    }
    if run.italic {
        props.push_str("<w:i/>\n");
    }
    if hyperlink {
        props.push_str("<w:color w:val=\"0563C1\"/>\n");
        props.push_str("<w:u w:val=\"single\"/>\n");
    }
    props
}

/// The fixed content-type manifest
fn content_types() -> ContentTypes {
    let mut ct = ContentTypes::new();
    ct.add_default("rels", ContentTypes::RELATIONSHIPS);
    ct.add_default("xml", ContentTypes::XML);
    ct.add_override(format!("/{}", DOCUMENT_PATH), ContentTypes::DOCUMENT_MAIN);
    ct.add_override(format!("/{}", STYLES_PATH), ContentTypes::STYLES);
    ct
}

/// The package-root relationships: a single link to the main document
fn package_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(DOCUMENT_PATH, Relationships::TYPE_OFFICE_DOCUMENT);
    rels
}

/// Build a DOCX package from elements with default options
pub fn build(elements: &[Element]) -> Result<Vec<u8>> {
    DocxWriter::new().build(elements)
}
