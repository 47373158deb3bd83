//! Integration tests for md2docx CLI
//!
//! These tests drive the full pipeline on real files:
//! Markdown file -> parse -> generate -> DOCX file on disk

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use tempfile::TempDir;
use zip::ZipArchive;

use md2docx_cli::{
    convert_command, convert_file, convert_markdown, extract_command, run_with_args,
    ConvertError, Direction,
};
use md2docx_ooxml::WriterConfig;

/// Read one entry of a DOCX file with a plain ZIP reader
fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_end_to_end_example() {
    let bytes = convert_markdown("# Title\n\nSome **bold** text.\n\n- item1\n- item2\n").unwrap();

    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    assert_eq!(archive.len(), 5);

    let doc = read_entry(&bytes, "word/document.xml");
    assert!(doc.contains("<w:pStyle w:val=\"Heading1\"/>"));
    assert!(doc.contains("<w:t xml:space=\"preserve\">Some </w:t>"));
    assert!(doc.contains("<w:b/>"));
    assert_eq!(doc.matches("<w:numId w:val=\"2\"/>").count(), 2);
}

#[test]
fn test_convert_command_writes_docx() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let input = write_file(dir.path(), "notes.md", "# Notes\n\n1. first\n2. second\n");

    convert_command(&[input], Some(&out), None).unwrap();

    let bytes = fs::read(out.join("notes.docx")).unwrap();
    let doc = read_entry(&bytes, "word/document.xml");
    assert!(doc.contains("Notes"));
    assert_eq!(doc.matches("<w:numId w:val=\"1\"/>").count(), 2);
}

#[test]
fn test_convert_command_expands_globs() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.md", "# A\n");
    write_file(dir.path(), "b.markdown", "# B\n");
    write_file(dir.path(), "c.txt", "# C\n");
    let out = dir.path().join("out");

    let pattern = dir.path().join("*").to_string_lossy().into_owned();
    convert_command(&[pattern], Some(&out), None).unwrap();

    assert!(out.join("a.docx").is_file());
    assert!(out.join("b.docx").is_file());
    assert!(!out.join("c.docx").exists());
}

#[test]
fn test_convert_command_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.md").to_string_lossy().into_owned();
    let err = convert_command(&[pattern], Some(dir.path()), None).unwrap_err();
    assert!(err.to_string().contains("No Markdown files matched"));
}

#[test]
fn test_same_named_inputs_do_not_overwrite() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    let first = write_file(&dir.path().join("a"), "notes.md", "# From A\n");
    let second = write_file(&dir.path().join("b"), "notes.md", "# From B\n");
    let out = dir.path().join("out");

    convert_command(&[first, second], Some(&out), None).unwrap();

    let outputs: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(outputs.len(), 1);
    let bytes = fs::read(out.join("notes.docx")).unwrap();
    let doc = read_entry(&bytes, "word/document.xml");
    assert!(doc.contains("From A"));
    assert!(!doc.contains("From B"));
}

#[test]
fn test_config_file_applies_writer_settings() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("build");
    let config = dir.path().join("md2docx.toml");
    fs::write(
        &config,
        format!(
            "[writer]\ncode_font = \"Consolas\"\nhyperlinks = true\n\n[output]\ndirectory = {:?}\n",
            out.to_string_lossy()
        ),
    )
    .unwrap();
    let input = write_file(
        dir.path(),
        "doc.md",
        "Run `cargo` or see [docs](https://example.com).\n",
    );

    convert_command(&[input], None, Some(&config)).unwrap();

    let bytes = fs::read(out.join("doc.docx")).unwrap();
    let doc = read_entry(&bytes, "word/document.xml");
    assert!(doc.contains("w:ascii=\"Consolas\""));
    assert!(doc.contains("<w:hyperlink r:id=\"rId2\">"));

    let rels = read_entry(&bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains("https://example.com"));
    assert!(rels.contains("TargetMode=\"External\""));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "doc.md", "text\n");
    let missing = dir.path().join("nope.toml");
    assert!(convert_command(&[input], Some(dir.path()), Some(&missing)).is_err());
}

#[test]
fn test_output_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "same.md", "first\n");
    fs::write(dir.path().join("same.docx"), b"stale").unwrap();

    convert_command(&[input], Some(dir.path()), None).unwrap();

    let bytes = fs::read(dir.path().join("same.docx")).unwrap();
    assert!(read_entry(&bytes, "word/document.xml").contains("first"));
}

#[test]
fn test_dotted_stem_keeps_full_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.v2.md");
    fs::write(&input, "x\n").unwrap();

    let output = convert_file(&input, Direction::MdToDocx, dir.path(), &WriterConfig::default())
        .unwrap();
    assert_eq!(output, dir.path().join("notes.v2.docx"));
}

#[test]
fn test_extract_is_not_implemented() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("report.docx");
    fs::write(&input, b"not even a zip").unwrap();

    let err = extract_command(&[input]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConvertError>(),
        Some(ConvertError::Unsupported(Direction::DocxToMd))
    ));
    // Nothing is produced
    assert!(!dir.path().join("report.md").exists());
}

#[test]
fn test_run_with_args() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "cli.md", "| a | b |\n|---|---|\n| 1 | 2 |\n");
    let out = dir.path().join("out");

    run_with_args([
        "md2docx",
        "convert",
        input.as_str(),
        "--output",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let bytes = fs::read(out.join("cli.docx")).unwrap();
    let doc = read_entry(&bytes, "word/document.xml");
    assert_eq!(doc.matches("<w:tr>").count(), 2);
}

#[test]
fn test_run_with_args_extract_fails() {
    assert!(run_with_args(["md2docx", "extract", "missing.docx"]).is_err());
}
