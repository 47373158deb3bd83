//! Styles part (`word/styles.xml`)
//!
//! Defines the base `Normal` paragraph style and the heading styles that
//! heading paragraphs reference through `w:pStyle`.

use serde::{Deserialize, Serialize};

use crate::xml::{escape_xml, XML_DECLARATION};

/// WordprocessingML main namespace
pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Style ID of the base paragraph style
pub const NORMAL_STYLE_ID: &str = "Normal";

/// Font used by every heading style
const HEADING_FONT: &str = "Calibri Light";

/// Which heading levels get a style definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyles {
    /// Heading1 through Heading6
    #[default]
    All,
    /// Heading1 through Heading3 only; deeper headings render as `Normal`
    Legacy,
}

impl HeadingStyles {
    /// Deepest level with a style definition
    pub fn max_level(self) -> u8 {
        match self {
            HeadingStyles::All => 6,
            HeadingStyles::Legacy => 3,
        }
    }
}

/// Visual properties of one heading level
#[derive(Debug, Clone, Copy)]
struct HeadingLook {
    /// Font size in half-points
    size: u32,
    /// Hex RGB colour
    color: &'static str,
    /// Space before, in twentieths of a point
    space_before: u32,
}

const HEADING_LOOKS: [HeadingLook; 6] = [
    HeadingLook {
        size: 32,
        color: "2F5496",
        space_before: 480,
    },
    HeadingLook {
        size: 26,
        color: "2F5496",
        space_before: 200,
    },
    HeadingLook {
        size: 24,
        color: "1F3763",
        space_before: 200,
    },
    HeadingLook {
        size: 22,
        color: "1F3763",
        space_before: 200,
    },
    HeadingLook {
        size: 22,
        color: "1F3763",
        space_before: 200,
    },
    HeadingLook {
        size: 22,
        color: "1F3763",
        space_before: 200,
    },
];

/// Style ID referenced by a heading of the given level
pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", level)
}

/// Generator for the styles part
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleSheet {
    headings: HeadingStyles,
}

impl StyleSheet {
    pub fn new(headings: HeadingStyles) -> Self {
        Self { headings }
    }

    /// Whether a `HeadingN` style is defined for `level`
    pub fn defines_heading(&self, level: u8) -> bool {
        (1..=self.headings.max_level()).contains(&level)
    }

    /// Serialize to `word/styles.xml`
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, WORDPROCESSINGML_NS));
        xml.push('\n');

        xml.push_str(&format!(
            "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"{}\">\n",
            NORMAL_STYLE_ID
        ));
        xml.push_str(&format!("<w:name w:val=\"{}\"/>\n", NORMAL_STYLE_ID));
        xml.push_str("<w:qFormat/>\n");
        xml.push_str("</w:style>\n");

        for level in 1..=self.headings.max_level() {
            let look = HEADING_LOOKS[usize::from(level) - 1];
            push_heading_style(&mut xml, level, look);
        }

        xml.push_str("</w:styles>");
        xml
    }
}

fn push_heading_style(xml: &mut String, level: u8, look: HeadingLook) {
    xml.push_str(&format!(
        "<w:style w:type=\"paragraph\" w:styleId=\"{}\">\n",
        heading_style_id(level)
    ));
    xml.push_str(&format!("<w:name w:val=\"heading {}\"/>\n", level));
    xml.push_str(&format!("<w:basedOn w:val=\"{}\"/>\n", NORMAL_STYLE_ID));
    xml.push_str(&format!("<w:next w:val=\"{}\"/>\n", NORMAL_STYLE_ID));
    xml.push_str("<w:qFormat/>\n");

    xml.push_str("<w:pPr>\n");
    xml.push_str("<w:keepNext/>\n");
    xml.push_str(&format!(
        "<w:spacing w:before=\"{}\" w:after=\"0\"/>\n",
        look.space_before
    ));
    // outlineLvl is zero-based
    xml.push_str(&format!("<w:outlineLvl w:val=\"{}\"/>\n", level - 1));
    xml.push_str("</w:pPr>\n");

    xml.push_str("<w:rPr>\n");
    let font = escape_xml(HEADING_FONT);
    xml.push_str(&format!(
        "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\"/>\n",
        font, font
    ));
    xml.push_str(&format!("<w:color w:val=\"{}\"/>\n", look.color));
    xml.push_str(&format!("<w:sz w:val=\"{}\"/>\n", look.size));
    xml.push_str("</w:rPr>\n");

    xml.push_str("</w:style>\n");
}
