//! Editor session state: the document buffer, viewport, and status message.
//!
//! There is exactly one session per process. It is created at startup from an
//! optional file path and handed by `&mut` to the dispatcher, the prompt, the
//! search engine, and the renderer; nothing here is global.
//!
//! Status Messages:
//! - A message keeps the instant it was set. The renderer decides visibility
//!   against a configurable age so redraw frequency never affects expiry.
//! - Expired messages stay in memory; only their display is suppressed.
//!
//! Search Highlight:
//! - `search_match` marks the render span of the current search hit. The
//!   search engine owns its lifecycle (set on hit, cleared on the next
//!   keystroke and when the prompt closes).

use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod buffer;
pub mod viewport;

pub use buffer::{Cursor, TextBuffer};
pub use viewport::{ScreenSize, Viewport};

/// Transient message shown in the message bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, set_at: Instant) -> Self {
        Self {
            text: text.into(),
            set_at,
        }
    }

    /// True while the message is younger than `ttl` at `now`.
    pub fn is_visible(&self, now: Instant, ttl: Duration) -> bool {
        !self.text.is_empty() && now.saturating_duration_since(self.set_at) < ttl
    }
}

/// Render-space span of a search hit on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchHighlight {
    pub row: usize,
    pub rx: usize,
    pub len: usize,
}

impl MatchHighlight {
    pub fn contains(&self, row: usize, rx: usize) -> bool {
        row == self.row && rx >= self.rx && rx < self.rx + self.len
    }
}

/// Aggregate state for the single open document.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub file_name: Option<PathBuf>,
    pub buffer: TextBuffer,
    pub viewport: Viewport,
    pub screen: ScreenSize,
    pub status: Option<StatusMessage>,
    pub search_match: Option<MatchHighlight>,
}

impl EditorSession {
    pub fn new(buffer: TextBuffer, screen: ScreenSize) -> Self {
        Self {
            file_name: None,
            buffer,
            viewport: Viewport::new(),
            screen,
            status: None,
            search_match: None,
        }
    }

    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    /// Replace the status message, stamping it with the current instant.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.set_status_at(text, Instant::now());
    }

    pub fn set_status_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::trace!(target: "state", len = text.len(), "status_message");
        self.status = Some(StatusMessage::new(text, now));
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|m| m.text.as_str())
    }

    pub fn cursor(&self) -> Cursor {
        self.viewport.cursor
    }

    /// Mutably borrow the buffer and cursor together for an edit.
    pub fn edit_parts(&mut self) -> (&mut TextBuffer, &mut Cursor) {
        (&mut self.buffer, &mut self.viewport.cursor)
    }

    /// Display name for the status bar.
    pub fn display_name(&self) -> String {
        match &self.file_name {
            Some(p) => p.to_string_lossy().into_owned(),
            None => "[No Name]".to_string(),
        }
    }
}

/// Split file contents into rows. Both `\n` and `\r\n` terminate a line; a
/// trailing terminator does not create an extra empty row.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let mut end = line.len();
            while end > 0 && matches!(line[end - 1], b'\r' | b'\n') {
                end -= 1;
            }
            line[..end].to_vec()
        })
        .collect()
}
