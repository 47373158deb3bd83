//! Behaviour tests for the Markdown parser
//!
//! Each test pins one observable property of `parse` on a small input.

use md2docx_ast::{Document, Element, Heading, List, Paragraph, Run, Table};
use md2docx_core::{parse, parse_inline};

fn paragraph(doc: &Document, index: usize) -> &Paragraph {
    match &doc.elements[index] {
        Element::Paragraph(p) => p,
        other => panic!("Expected paragraph at {}, got {:?}", index, other),
    }
}

fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn test_heading_levels_one_to_six() {
    for level in 1..=6 {
        let input = format!("{} text", "#".repeat(level));
        let doc = parse(&input);
        assert_eq!(
            doc.elements,
            vec![Element::Heading(Heading::new(level, "text"))],
            "level {}",
            level
        );
    }
}

#[test]
fn test_heading_deeper_than_six_clamps() {
    let doc = parse("######## deep");
    match &doc.elements[0] {
        Element::Heading(h) => {
            assert_eq!(h.level, 6);
            assert_eq!(h.text, "deep");
        }
        other => panic!("Expected heading, got {:?}", other),
    }
}

#[test]
fn test_heading_keeps_markup_literally() {
    let doc = parse("## A **bold** title");
    assert_eq!(
        doc.elements,
        vec![Element::Heading(Heading::new(2, "A **bold** title"))]
    );
}

#[test]
fn test_plain_paragraph_single_run() {
    let doc = parse("Just some words here.");
    let para = paragraph(&doc, 0);
    assert_eq!(para.runs, vec![Run::plain("Just some words here.")]);
}

#[test]
fn test_paragraph_lines_joined_with_space() {
    let doc = parse("first line\n   second line  \nthird\n\nnext paragraph");
    assert_eq!(doc.len(), 2);
    assert_eq!(paragraph(&doc, 0).plain_text(), "first line second line third");
    assert_eq!(paragraph(&doc, 1).plain_text(), "next paragraph");
}

#[test]
fn test_paragraph_stops_at_special_line() {
    let doc = parse("intro text\n- item\n# Heading");
    assert_eq!(doc.len(), 3);
    assert_eq!(paragraph(&doc, 0).plain_text(), "intro text");
    assert!(matches!(doc.elements[1], Element::List(_)));
    assert!(matches!(doc.elements[2], Element::Heading(_)));
}

#[test]
fn test_inline_bold_and_code() {
    assert_eq!(parse_inline("**bold**"), vec![Run::plain("bold").with_bold(true)]);
    assert_eq!(parse_inline("`code`"), vec![Run::plain("code").with_code(true)]);
}

#[test]
fn test_link_and_image() {
    let doc = parse("[A](http://x)");
    assert_eq!(
        paragraph(&doc, 0).runs,
        vec![Run::plain("A").with_link("http://x")]
    );

    let doc = parse("![A](http://x)");
    let runs = &paragraph(&doc, 0).runs;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text, "[Image: A]");
    assert!(runs[0].italic);
    assert!(runs[0].link.is_none());
}

#[test]
fn test_table() {
    let doc = parse("a|b\n-|-\n1|2");
    assert_eq!(
        doc.elements,
        vec![Element::Table(Table {
            rows: cells(&[&["a", "b"], &["1", "2"]]),
        })]
    );
}

#[test]
fn test_table_ragged_rows_and_terminator() {
    let doc = parse("| h1 | h2 | h3 |\n|:---|:---:|---:|\n| x |\n| y | z |\nafter");
    assert_eq!(doc.len(), 2);
    assert_eq!(
        doc.elements[0],
        Element::Table(Table {
            rows: cells(&[&["h1", "h2", "h3"], &["x"], &["y", "z"]]),
        })
    );
    assert_eq!(paragraph(&doc, 1).plain_text(), "after");
}

#[test]
fn test_pipe_rows_without_separator_are_not_a_table() {
    let doc = parse("a | b\nc | d");
    assert!(doc.iter().all(|e| !matches!(e, Element::Table(_))));
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_ordered_list() {
    let doc = parse("1. x\n2. y");
    assert_eq!(
        doc.elements,
        vec![Element::List(List {
            ordered: true,
            items: vec!["x".into(), "y".into()],
        })]
    );
}

#[test]
fn test_list_items_lose_formatting() {
    let doc = parse("- **bold** item\n+ `code`");
    assert_eq!(
        doc.elements,
        vec![Element::List(List {
            ordered: false,
            items: vec!["**bold** item".into(), "`code`".into()],
        })]
    );
}

#[test]
fn test_mixed_list_uses_first_marker() {
    let doc = parse("1. one\n- two\n3. three");
    assert_eq!(
        doc.elements,
        vec![Element::List(List {
            ordered: true,
            items: vec!["one".into(), "- two".into(), "three".into()],
        })]
    );
}

#[test]
fn test_blank_line_ends_list() {
    let doc = parse("- a\n\n- b");
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_code_block() {
    let doc = parse("```rust\nfn main() {}\n    indented\n```\nafter");
    assert_eq!(doc.len(), 2);
    assert_eq!(
        paragraph(&doc, 0).runs,
        vec![Run::plain("fn main() {}\n    indented").with_code(true)]
    );
}

#[test]
fn test_empty_code_block_literal() {
    let doc = parse("```\n```");
    assert_eq!(
        paragraph(&doc, 0).runs,
        vec![Run::plain("Code block").with_code(true)]
    );
}

#[test]
fn test_unterminated_code_block_runs_to_end() {
    let doc = parse("```\n# not a heading\n- not a list");
    assert_eq!(doc.len(), 1);
    assert_eq!(
        paragraph(&doc, 0).runs[0].text,
        "# not a heading\n- not a list"
    );
}

#[test]
fn test_end_to_end_example() {
    let doc = parse("# Title\n\nSome **bold** text.\n\n- item1\n- item2\n");
    assert_eq!(
        doc.elements,
        vec![
            Element::Heading(Heading::new(1, "Title")),
            Element::Paragraph(Paragraph::new(vec![
                Run::plain("Some "),
                Run::plain("bold").with_bold(true),
                Run::plain(" text."),
            ])),
            Element::List(List {
                ordered: false,
                items: vec!["item1".into(), "item2".into()],
            }),
        ]
    );
}

#[test]
fn test_document_serializes_to_json() {
    let doc = parse("# T");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["elements"][0]["type"], "heading");
    assert_eq!(json["elements"][0]["level"], 1);
}
