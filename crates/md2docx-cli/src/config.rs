//! Configuration
//!
//! Settings are loaded from `md2docx.toml` (or `.md2docx.toml`) in the
//! working directory, or from an explicit `--config` path:
//!
//! ```toml
//! [writer]
//! code_font = "Consolas"
//! heading_styles = "all"
//! hyperlinks = true
//!
//! [output]
//! directory = "build/"
//! ```
//!
//! Missing tables and keys fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use md2docx_ooxml::WriterConfig;

/// File names searched for, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["md2docx.toml", ".md2docx.toml"];

/// Top-level settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Package generation options
    pub writer: WriterConfig,
    /// Where converted files go
    pub output: OutputSettings,
}

/// Output location settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for generated files; the working directory when unset
    pub directory: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read settings from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }
}

/// Load settings from an explicit path, or search the working directory
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    load_settings_in(Path::new("."), explicit)
}

/// Load settings from an explicit path, or search `dir`
///
/// An explicit path must exist. Without one, the first candidate file found
/// in `dir` is used; if none exists the defaults apply.
pub fn load_settings_in(dir: &Path, explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return Settings::from_file(path);
    }

    for name in CONFIG_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            return Settings::from_file(&candidate);
        }
    }

    debug!("no config file found, using defaults");
    Ok(Settings::default())
}
