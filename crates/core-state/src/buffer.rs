//! Ordered row storage with dirty tracking.
//!
//! All edits take the cursor by `&mut` and leave it where the edit implies
//! (after an inserted byte, at the start of a split line, at the join point).
//! Out-of-range coordinates are treated as no-ops and never panic.
//!
//! `dirty` counts mutations since the last load or save. It only ever grows
//! until [`TextBuffer::mark_clean`] is called after a successful write.

use core_text::Row;

/// Cursor in buffer coordinates: `cx` is a byte column, `cy` a row index.
/// `cy == len()` is the virtual line just past the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
}

impl Cursor {
    pub fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    pub fn origin() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rows: Vec<Row>,
    dirty: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a clean buffer from already newline-stripped lines.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        Self {
            rows: lines.into_iter().map(Row::new).collect(),
            dirty: 0,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of row `at`, or 0 for the virtual line / out-of-range rows.
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Reset the mutation counter after the document was persisted.
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Insert a new row before index `at` (`at == len()` appends).
    pub fn insert_row(&mut self, at: usize, content: impl Into<Vec<u8>>) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.rows.insert(at, Row::new(content));
        self.dirty += 1;
        true
    }

    pub fn delete_row(&mut self, at: usize) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.rows.remove(at);
        self.dirty += 1;
        true
    }

    /// Insert `byte` at the cursor and advance it. Typing on the virtual line
    /// first appends an empty row. A line feed is refused; rows are split with
    /// [`TextBuffer::insert_newline`].
    pub fn insert_char(&mut self, cur: &mut Cursor, byte: u8) {
        if byte == b'\n' {
            return;
        }
        if cur.cy == self.rows.len() {
            self.insert_row(cur.cy, Vec::new());
        }
        let Some(row) = self.rows.get_mut(cur.cy) else {
            return;
        };
        if cur.cx > row.len() {
            return;
        }
        row.insert(cur.cx, byte);
        self.dirty += 1;
        cur.cx += 1;
    }

    /// Delete the byte left of the cursor; at column 0 joins with the row above.
    pub fn delete_char(&mut self, cur: &mut Cursor) {
        if cur.cy >= self.rows.len() {
            return;
        }
        if cur.cx == 0 && cur.cy == 0 {
            return;
        }
        if cur.cx == 0 {
            self.join_with_previous(cur);
            return;
        }
        let row = &mut self.rows[cur.cy];
        if row.remove(cur.cx - 1) {
            self.dirty += 1;
            cur.cx -= 1;
        }
    }

    /// Move `chars[cx..]` of the cursor row into a new row below it.
    pub fn split_line(&mut self, cur: &mut Cursor) {
        let Some(row) = self.rows.get_mut(cur.cy) else {
            return;
        };
        if cur.cx > row.len() {
            return;
        }
        let tail = row.split_off(cur.cx);
        self.rows.insert(cur.cy + 1, Row::new(tail));
        self.dirty += 1;
        cur.cy += 1;
        cur.cx = 0;
    }

    /// Enter key semantics: at column 0 an empty row is opened above the
    /// cursor (this also covers the virtual line), otherwise the row is split.
    pub fn insert_newline(&mut self, cur: &mut Cursor) {
        if cur.cx == 0 {
            if self.insert_row(cur.cy, Vec::new()) {
                cur.cy += 1;
            }
        } else {
            self.split_line(cur);
        }
    }

    /// Append the cursor row to the previous row and remove it.
    pub fn join_with_previous(&mut self, cur: &mut Cursor) {
        if cur.cy == 0 || cur.cy >= self.rows.len() {
            return;
        }
        let current = self.rows.remove(cur.cy);
        let prev = &mut self.rows[cur.cy - 1];
        let prev_len = prev.len();
        prev.append(current.chars());
        self.dirty += 1;
        cur.cy -= 1;
        cur.cx = prev_len;
    }

    /// On-disk form: every row followed by a single `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }
}
