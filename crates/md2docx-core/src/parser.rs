//! Markdown Parser
//!
//! This module parses Markdown text into a `md2docx_ast::Document`.
//!
//! The scanner is line oriented: it walks the input top-down with a cursor
//! and dispatches on the trimmed line's prefix.
//!
//! # Supported Syntax
//!
//! - Headings: `# Title` through `###### Title` (deeper levels clamp to 6)
//! - Tables: a pipe row followed by a `---|---` separator row
//! - Fenced code: three backticks, language tag ignored
//! - Lists: `- item`, `* item`, `+ item`, `1. item`
//! - Paragraphs: consecutive plain lines joined with spaces
//! - Inline: `**bold**`, `*italic*`, `` `code` ``, `[text](url)`, `![alt](src)`
//!
//! # Example
//!
//! ```
//! use md2docx_core::parser;
//!
//! let doc = parser::parse("1. first\n2. second\n");
//! assert_eq!(doc.len(), 1);
//! ```

use std::sync::OnceLock;

use md2docx_ast::{Document, Heading, List, Paragraph, Run, Table};
use regex::Regex;
use tracing::{debug, trace};

use crate::inline::parse_inline;

const FENCE: &str = "```";

/// Literal used when a fenced block has no content
const EMPTY_CODE_BLOCK: &str = "Code block";

/// Line-oriented Markdown scanner
struct Parser<'a> {
    /// Input lines, untrimmed
    lines: Vec<&'a str>,
    /// Index of the next unconsumed line
    cursor: usize,
    /// Accumulated elements
    doc: Document,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            cursor: 0,
            doc: Document::new(),
        }
    }

    /// Trimmed line at `index`, if any
    fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied().map(str::trim)
    }

    /// Parse the entire input
    fn parse(mut self) -> Document {
        while let Some(line) = self.line(self.cursor) {
            if line.is_empty() {
                self.cursor += 1;
                continue;
            }

            let next = self.line(self.cursor + 1);

            if line.starts_with('#') {
                self.parse_heading(line);
            } else if is_table_start(line, next) {
                self.parse_table();
            } else if line.starts_with(FENCE) {
                self.parse_code_block();
            } else if is_list_item(line) {
                self.parse_list();
            } else {
                self.parse_paragraph();
            }
        }

        debug!(elements = self.doc.len(), "parsed markdown");
        self.doc
    }

    /// Consume one heading line; malformed headings are dropped
    fn parse_heading(&mut self, line: &str) {
        self.cursor += 1;

        let level = line.chars().take_while(|&c| c == '#').count();
        let rest = &line[level..];

        // At least one space between the hashes and the text
        if !rest.starts_with(char::is_whitespace) {
            trace!(line, "skipping heading without space after hashes");
            return;
        }
        let text = rest.trim();
        if text.is_empty() {
            trace!(line, "skipping heading without text");
            return;
        }

        self.doc.push(Heading::new(level, text));
    }

    /// Consume a header row, a separator row and the data rows after them
    fn parse_table(&mut self) {
        let mut rows = Vec::new();

        if let Some(header) = self.line(self.cursor) {
            rows.push(split_table_row(header));
        }
        // Skip the header and the separator
        self.cursor += 2;

        while let Some(line) = self.line(self.cursor) {
            if line.is_empty() || !line.contains('|') {
                break;
            }
            rows.push(split_table_row(line));
            self.cursor += 1;
        }

        debug!(rows = rows.len(), "parsed table");
        self.doc.push(Table { rows });
    }

    /// Consume a fenced code block up to and including its closing fence
    fn parse_code_block(&mut self) {
        // Opening fence; the language tag after it is not kept
        self.cursor += 1;

        let mut body: Vec<&str> = Vec::new();
        while let Some(&raw) = self.lines.get(self.cursor) {
            if raw.trim() == FENCE {
                break;
            }
            // Empty lines before the first content line are dropped
            if !(body.is_empty() && raw.is_empty()) {
                body.push(raw);
            }
            self.cursor += 1;
        }
        // Closing fence (a no-op past end of input)
        self.cursor += 1;

        let code = body.join("\n");
        let text = if code.is_empty() {
            EMPTY_CODE_BLOCK.to_string()
        } else {
            code
        };

        self.doc
            .push(Paragraph::new(vec![Run::plain(text).with_code(true)]));
    }

    /// Consume consecutive list items
    ///
    /// The first item's marker decides ordering. Later items are only checked
    /// against the generic list-item test, so a mixed block becomes one list.
    fn parse_list(&mut self) {
        static ORDERED_MARKER_RE: OnceLock<Regex> = OnceLock::new();
        static ORDERED_STRIP_RE: OnceLock<Regex> = OnceLock::new();
        static BULLET_STRIP_RE: OnceLock<Regex> = OnceLock::new();

        let ordered_marker_re = ORDERED_MARKER_RE
            .get_or_init(|| Regex::new(r"^\d+\.").expect("ordered marker pattern is valid"));

        let ordered = self
            .line(self.cursor)
            .is_some_and(|first| ordered_marker_re.is_match(first));
        let strip = if ordered {
            ORDERED_STRIP_RE
                .get_or_init(|| Regex::new(r"^\d+\.\s*").expect("ordered strip pattern is valid"))
        } else {
            BULLET_STRIP_RE
                .get_or_init(|| Regex::new(r"^[-*+]\s*").expect("bullet strip pattern is valid"))
        };

        let mut items = Vec::new();
        while let Some(line) = self.line(self.cursor) {
            if line.is_empty() || !is_list_item(line) {
                break;
            }
            items.push(strip.replace(line, "").into_owned());
            self.cursor += 1;
        }

        debug!(ordered, items = items.len(), "parsed list");
        self.doc.push(List { ordered, items });
    }

    /// Join consecutive plain lines into one paragraph
    fn parse_paragraph(&mut self) {
        let mut parts: Vec<&str> = Vec::new();

        while let Some(line) = self.line(self.cursor) {
            // The first line is always taken so the cursor makes progress,
            // e.g. on a lone pipe row that did not start a table.
            if line.is_empty() || (!parts.is_empty() && is_special_line(line)) {
                break;
            }
            parts.push(line);
            self.cursor += 1;
        }

        let text = parts.join(" ");
        self.doc.push(Paragraph::new(parse_inline(&text)));
    }
}

/// Check whether a trimmed line is a bullet or numbered list item
fn is_list_item(line: &str) -> bool {
    static BULLET_ITEM_RE: OnceLock<Regex> = OnceLock::new();
    static ORDERED_ITEM_RE: OnceLock<Regex> = OnceLock::new();

    let bullet_re =
        BULLET_ITEM_RE.get_or_init(|| Regex::new(r"^[-*+]\s").expect("bullet pattern is valid"));
    let ordered_re =
        ORDERED_ITEM_RE.get_or_init(|| Regex::new(r"^\d+\.\s").expect("ordered pattern is valid"));

    bullet_re.is_match(line) || ordered_re.is_match(line)
}

/// Check whether `line` and `next` open a table
///
/// Both must contain a pipe and `next` must be a separator row made only of
/// pipes, colons, dashes and whitespace.
fn is_table_start(line: &str, next: Option<&str>) -> bool {
    let Some(next) = next else {
        return false;
    };
    !line.is_empty() && line.contains('|') && next.contains('|') && is_separator_row(next)
}

fn is_separator_row(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| matches!(c, '|' | ':' | '-') || c.is_whitespace())
}

/// Lines that end a paragraph
fn is_special_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(FENCE) || is_list_item(line) || line.contains('|')
}

/// Split a pipe row into trimmed, non-empty cells
fn split_table_row(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse Markdown text into a `Document`.
///
/// # Arguments
///
/// * `text` - The Markdown source text to parse
///
/// # Returns
///
/// The parsed elements in source order. Parsing is lenient and never fails;
/// unknown or malformed constructs become plain paragraphs or are dropped.
pub fn parse(text: &str) -> Document {
    let text = text.replace("\r\n", "\n");
    Parser::new(&text).parse()
}
