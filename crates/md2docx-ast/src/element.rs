//! Block-level document elements
//!
//! Every parsed block is exactly one `Element` variant.

use serde::{Deserialize, Serialize};

use crate::run::Run;

/// Deepest heading level; deeper headings are clamped to it
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A section heading
    Heading(Heading),
    /// A paragraph of formatted runs
    Paragraph(Paragraph),
    /// An ordered or unordered list
    List(List),
    /// A table of plain-text cells
    Table(Table),
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6, where 1 is the highest)
    pub level: u8,
    /// Heading text, no inline formatting
    pub text: String,
}

impl Heading {
    /// Create a heading, clamping the level into 1..=6
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        let level = level.clamp(1, MAX_HEADING_LEVEL as usize) as u8;
        Self {
            level,
            text: text.into(),
        }
    }
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in source order
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Concatenated text of all runs
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct List {
    /// Numbered list when true, bulleted otherwise
    pub ordered: bool,
    /// Item text, flattened to plain text
    pub items: Vec<String>,
}

/// A table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows of cell text; the first row is the header. Rows may differ in length.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Widest row's cell count
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl Element {
    /// Short lowercase name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Heading(_) => "heading",
            Element::Paragraph(_) => "paragraph",
            Element::List(_) => "list",
            Element::Table(_) => "table",
        }
    }
}

impl From<Heading> for Element {
    fn from(heading: Heading) -> Self {
        Element::Heading(heading)
    }
}

impl From<Paragraph> for Element {
    fn from(para: Paragraph) -> Self {
        Element::Paragraph(para)
    }
}

impl From<List> for Element {
    fn from(list: List) -> Self {
        Element::List(list)
    }
}

impl From<Table> for Element {
    fn from(table: Table) -> Self {
        Element::Table(table)
    }
}
