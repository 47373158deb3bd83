//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use md2docx_ooxml::WriterConfig;

use crate::config::load_settings;
use crate::convert::{convert_file, Direction};

#[derive(Parser)]
#[command(name = "md2docx")]
#[command(author, version, about = "Convert Markdown to Word documents", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown files to DOCX
    Convert {
        /// Input files or glob patterns (.md, .markdown)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert DOCX files back to Markdown (not implemented)
    Extract {
        /// Input DOCX files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Run the CLI with explicit arguments (the first one is the program name)
pub fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run(Cli::try_parse_from(args)?)
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            config,
        } => convert_command(&inputs, output.as_deref(), config.as_deref()),
        Commands::Extract { inputs } => extract_command(&inputs),
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins over the default level. A second call is a no-op.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the convert command
///
/// Files are converted one after another. A failing file is reported and
/// the remaining files are still converted; the command fails afterwards.
pub fn convert_command(
    inputs: &[String],
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let settings = load_settings(config)?;

    let output_dir = output
        .map(Path::to_path_buf)
        .or(settings.output.directory)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let files = expand_inputs(inputs)?;
    if files.is_empty() {
        anyhow::bail!("No Markdown files matched: {}", inputs.join(", "));
    }

    let mut failures = 0;
    for file in &files {
        match convert_file(file, Direction::MdToDocx, &output_dir, &settings.writer) {
            Ok(path) => println!("  Created: {}", path.display()),
            Err(e) => {
                failures += 1;
                error!("{:#}", e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed to convert", failures, files.len());
    }

    println!();
    println!("Converted {} file(s) into {}", files.len(), output_dir.display());
    Ok(())
}

/// Execute the extract command
///
/// Always fails: the reverse direction is not implemented. Inputs are never
/// opened.
pub fn extract_command(inputs: &[PathBuf]) -> Result<()> {
    let settings = WriterConfig::default();
    let mut last_err = None;

    for input in inputs {
        if let Err(e) = convert_file(input, Direction::DocxToMd, Path::new("."), &settings) {
            error!(input = %input.display(), "{}", e);
            last_err = Some(e);
        }
    }

    match last_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Expand glob patterns and keep Markdown files, in pattern order
///
/// Outputs are named after the input stem, so only the first input with a
/// given stem is kept; later ones are skipped with a warning.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut stems: HashSet<OsString> = HashSet::new();

    for pattern in patterns {
        let mut matched = false;
        for entry in glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
            match entry {
                Ok(path) => {
                    if path.is_file() && Direction::from_path(&path) == Some(Direction::MdToDocx) {
                        matched = true;
                        if files.contains(&path) {
                            continue;
                        }
                        let stem = path.file_stem().unwrap_or_default().to_os_string();
                        if stems.insert(stem) {
                            files.push(path);
                        } else {
                            warn!(
                                path = %path.display(),
                                "skipping input: another input already writes the same output name"
                            );
                        }
                    }
                }
                Err(e) => warn!("Could not read {}", e),
            }
        }
        if !matched {
            warn!(%pattern, "no Markdown files matched");
        }
    }

    Ok(files)
}
