//! Conversion pipeline
//!
//! Each conversion reads one input, parses it completely, then generates the
//! package completely. Nothing is shared between conversions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use md2docx_core::parse;
use md2docx_ooxml::{DocxWriter, WriterConfig};

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Markdown source to DOCX package
    MdToDocx,
    /// DOCX package back to Markdown
    DocxToMd,
}

impl Direction {
    /// Infer the direction from an input file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Direction::MdToDocx),
            "docx" => Some(Direction::DocxToMd),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::MdToDocx => write!(f, "Markdown to DOCX"),
            Direction::DocxToMd => write!(f, "DOCX to Markdown"),
        }
    }
}

/// Errors raised before any conversion work starts
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The requested direction has no implementation
    #[error("{0} conversion is not implemented")]
    Unsupported(Direction),
}

/// Convert Markdown text to DOCX bytes with default options
pub fn convert_markdown(text: &str) -> Result<Vec<u8>> {
    convert_markdown_with(text, &WriterConfig::default())
}

/// Convert Markdown text to DOCX bytes
pub fn convert_markdown_with(text: &str, config: &WriterConfig) -> Result<Vec<u8>> {
    let doc = parse(text);
    debug!(elements = doc.len(), "parsed markdown");

    let bytes = DocxWriter::with_config(config.clone())
        .build(doc.as_slice())
        .context("Failed to generate DOCX package")?;
    debug!(bytes = bytes.len(), "generated docx");
    Ok(bytes)
}

/// Convert one file and write the result into `output_dir`
///
/// Returns the path of the written file. The output is named after the
/// input's stem (`notes.md` becomes `notes.docx`).
pub fn convert_file(
    input: &Path,
    direction: Direction,
    output_dir: &Path,
    config: &WriterConfig,
) -> Result<PathBuf> {
    if direction == Direction::DocxToMd {
        return Err(ConvertError::Unsupported(direction).into());
    }

    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let bytes = convert_markdown_with(&source, config)
        .with_context(|| format!("Failed to convert: {}", input.display()))?;

    let stem = input
        .file_stem()
        .with_context(|| format!("Input has no file name: {}", input.display()))?;
    let mut file_name = stem.to_os_string();
    file_name.push(".docx");
    let output_path = output_dir.join(file_name);

    fs::write(&output_path, &bytes)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
    info!(
        input = %input.display(),
        output = %output_path.display(),
        bytes = bytes.len(),
        "converted"
    );

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_path() {
        assert_eq!(
            Direction::from_path(Path::new("a.md")),
            Some(Direction::MdToDocx)
        );
        assert_eq!(
            Direction::from_path(Path::new("a.Markdown")),
            Some(Direction::MdToDocx)
        );
        assert_eq!(
            Direction::from_path(Path::new("a.docx")),
            Some(Direction::DocxToMd)
        );
        assert_eq!(Direction::from_path(Path::new("a.txt")), None);
        assert_eq!(Direction::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_reverse_direction_fails_before_reading() {
        let missing = Path::new("/nonexistent/input.docx");
        let err = convert_file(
            missing,
            Direction::DocxToMd,
            Path::new("."),
            &WriterConfig::default(),
        )
        .unwrap_err();

        let convert_err = err.downcast_ref::<ConvertError>().unwrap();
        assert!(matches!(
            convert_err,
            ConvertError::Unsupported(Direction::DocxToMd)
        ));
        assert_eq!(
            err.to_string(),
            "DOCX to Markdown conversion is not implemented"
        );
    }

    #[test]
    fn test_convert_markdown_is_deterministic() {
        let text = "# Title\n\n- a\n- b\n";
        assert_eq!(
            convert_markdown(text).unwrap(),
            convert_markdown(text).unwrap()
        );
    }
}
