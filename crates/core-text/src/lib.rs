//! Line storage primitives.
//!
//! A [`Row`] owns the raw bytes of one line (no trailing newline) together
//! with a cached render form where tabs are expanded. The cache is private and
//! rebuilt inside every mutator, so a caller can never observe a render form
//! older than the characters it was derived from.

pub mod width;

pub use width::{TAB_STOP, cx_to_rx, expand_tabs, rx_to_cx};

/// One line of the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    pub fn new(chars: impl Into<Vec<u8>>) -> Self {
        let chars = chars.into();
        let render = expand_tabs(&chars);
        Self { chars, render }
    }

    /// Raw line content.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Display form (tabs expanded).
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Number of raw bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Rendered width in cells.
    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    pub fn cx_to_rx(&self, cx: usize) -> usize {
        cx_to_rx(&self.chars, cx)
    }

    pub fn rx_to_cx(&self, rx: usize) -> usize {
        rx_to_cx(&self.chars, rx)
    }

    /// Insert `byte` at `at`; positions past the end append.
    pub fn insert(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.refresh();
    }

    /// Remove the byte at `at`. Returns false (no-op) when out of range.
    pub fn remove(&mut self, at: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.refresh();
        true
    }

    /// Append raw bytes to the end of the line.
    pub fn append(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.refresh();
    }

    /// Truncate to `at` bytes, returning the removed tail.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.refresh();
        tail
    }

    /// Render column of the first occurrence of `needle` in the render form.
    /// An empty needle matches nowhere.
    pub fn find_in_render(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        self.render
            .windows(needle.len())
            .position(|window| window == needle)
    }

    fn refresh(&mut self) {
        self.render = expand_tabs(&self.chars);
    }
}
