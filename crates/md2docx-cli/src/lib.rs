//! md2docx CLI - Command-line interface library
//!
//! This library provides the CLI functionality for md2docx:
//! - Convert: Markdown to DOCX
//! - Extract: DOCX to Markdown (not implemented; always fails)
//!
//! # Library Usage
//!
//! ```
//! use md2docx_cli::convert_markdown;
//!
//! let bytes = convert_markdown("# Title\n\nSome **bold** text.\n")?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert one or more Markdown files
//! md2docx convert notes.md "docs/*.md" --output out/
//!
//! # Use explicit settings
//! md2docx convert notes.md --config md2docx.toml
//! ```

pub mod app;
pub mod config;
pub mod convert;

pub use app::{convert_command, extract_command, run_cli, run_with_args};
pub use config::{load_settings, OutputSettings, Settings};
pub use convert::{convert_file, convert_markdown, convert_markdown_with, ConvertError, Direction};
