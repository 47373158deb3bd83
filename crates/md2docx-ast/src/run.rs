//! Inline runs
//!
//! A run is a maximal span of paragraph text sharing one formatting state.

use serde::{Deserialize, Serialize};

/// A span of text with a single formatting state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Run {
    /// Text content, markup already stripped
    pub text: String,
    /// Bold formatting
    pub bold: bool,
    /// Italic formatting
    pub italic: bool,
    /// Monospace/code formatting
    pub code: bool,
    /// Hyperlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Embedded image source (data URI), kept as a reference only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Run {
    /// Create an unformatted run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create an italic placeholder run standing in for an image
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Default::default()
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_code(mut self, code: bool) -> Self {
        self.code = code;
        self
    }

    /// Attach a hyperlink target
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Attach an embedded image reference
    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.image = Some(src.into());
        self
    }

    /// Whether any character formatting is set
    pub fn is_formatted(&self) -> bool {
        self.bold || self.italic || self.code
    }
}
