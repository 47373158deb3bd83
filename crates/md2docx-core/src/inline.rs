//! Inline formatting extraction
//!
//! A single left-to-right scan over a logical paragraph line. Bold, italic
//! and code are independent toggles; each marker flushes the pending text
//! as a run carrying the flags in force *before* the toggle.
//!
//! Unbalanced markers are not repaired: an opening `**` that is never
//! closed leaves bold on until the end of the text.

use std::sync::OnceLock;

use md2docx_ast::Run;
use regex::Regex;

/// Source prefix marking an inline (base64) image
pub const EMBEDDED_IMAGE_SCHEME: &str = "data:image/";

/// Toggle markers recognised by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Code,
}

/// Scanner state threaded through the loop
#[derive(Debug, Default)]
struct InlineState {
    bold: bool,
    italic: bool,
    code: bool,
    buffer: String,
    runs: Vec<Run>,
}

impl InlineState {
    /// Emit the pending text as a run with the current flags
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        self.runs.push(self.styled(text));
    }

    fn toggle(&mut self, marker: Marker) {
        self.flush();
        match marker {
            Marker::Bold => self.bold = !self.bold,
            Marker::Italic => self.italic = !self.italic,
            Marker::Code => self.code = !self.code,
        }
    }

    fn styled(&self, text: String) -> Run {
        Run::plain(text)
            .with_bold(self.bold)
            .with_italic(self.italic)
            .with_code(self.code)
    }

    /// Emit a completed run that does not go through the buffer
    fn emit(&mut self, run: Run) {
        self.flush();
        self.runs.push(run);
    }
}

/// Split a logical line into formatted runs
///
/// The result is never empty: if the scan yields nothing (e.g. the text is
/// only markers), a single unformatted run holding the whole input is
/// returned.
pub fn parse_inline(text: &str) -> Vec<Run> {
    let mut state = InlineState::default();
    let mut pos = 0;
    let mut prev: Option<char> = None;

    while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];

        if rest.starts_with("**") {
            state.toggle(Marker::Bold);
            pos += 2;
            prev = Some('*');
            continue;
        }

        let consumed = match ch {
            '*' => {
                state.toggle(Marker::Italic);
                Some(1)
            }
            '`' => {
                state.toggle(Marker::Code);
                Some(1)
            }
            '[' if prev != Some('!') => scan_link(rest, &mut state),
            '!' => scan_image(rest, &mut state),
            _ => None,
        };

        match consumed {
            Some(len) => {
                pos += len;
                prev = text[..pos].chars().next_back();
            }
            None => {
                state.buffer.push(ch);
                pos += ch.len_utf8();
                prev = Some(ch);
            }
        }
    }

    state.flush();

    if state.runs.is_empty() {
        return vec![Run::plain(text)];
    }
    state.runs
}

/// Try to consume a link at the start of `rest`, returning the matched length
fn scan_link(rest: &str, state: &mut InlineState) -> Option<usize> {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();

    // `[text](url)` anchored at the scan position
    let link_re = LINK_RE
        .get_or_init(|| Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

    let caps = link_re.captures(rest)?;
    let run = state.styled(caps[1].to_string()).with_link(&caps[2]);
    state.emit(run);
    Some(caps[0].len())
}

/// Try to consume an image at the start of `rest`, returning the matched length
fn scan_image(rest: &str, state: &mut InlineState) -> Option<usize> {
    static IMAGE_RE: OnceLock<Regex> = OnceLock::new();

    // `![alt](src)` anchored at the scan position
    let image_re = IMAGE_RE
        .get_or_init(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid"));

    let caps = image_re.captures(rest)?;
    let alt = &caps[1];
    let src = &caps[2];

    let run = if src.starts_with(EMBEDDED_IMAGE_SCHEME) {
        let label = if alt.is_empty() { "Image" } else { alt };
        Run::placeholder(format!("[Embedded Image: {}]", label)).with_image(src)
    } else {
        let label = if alt.is_empty() { src } else { alt };
        Run::placeholder(format!("[Image: {}]", label))
    };
    state.emit(run);
    Some(caps[0].len())
}
