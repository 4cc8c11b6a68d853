//! Cursor and scroll state for the single editor window.

use crate::buffer::Cursor;

/// Text area dimensions (terminal size minus the status and message bars).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub rows: usize,
    pub cols: usize,
}

impl ScreenSize {
    /// Rows reserved below the text area for the status and message bars.
    pub const RESERVED_ROWS: usize = 2;

    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Derive the text area from the full terminal geometry.
    pub fn from_terminal(term_rows: u16, term_cols: u16) -> Self {
        Self {
            rows: usize::from(term_rows).saturating_sub(Self::RESERVED_ROWS),
            cols: usize::from(term_cols),
        }
    }
}

/// Cursor in buffer space plus the derived render column and scroll offsets.
///
/// `rx` and the offsets are recomputed once per frame from the cursor; the
/// whole struct is `Copy` so callers can snapshot and restore it verbatim
/// (search cancellation relies on this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub cursor: Cursor,
    pub rx: usize,
    pub row_offset: usize,
    pub col_offset: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor row relative to the top of the text area.
    pub fn screen_row(&self) -> usize {
        self.cursor.cy.saturating_sub(self.row_offset)
    }

    /// Cursor column relative to the left edge of the text area.
    pub fn screen_col(&self) -> usize {
        self.rx.saturating_sub(self.col_offset)
    }
}
