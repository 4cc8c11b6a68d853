//! Scroll reconciliation.
//!
//! Runs once at the start of every frame. It derives the render column from
//! the cursor and then moves the offsets by the minimum amount that keeps the
//! cursor inside `[offset, offset + size)` on both axes. The result depends
//! only on the cursor, the buffer and the screen size, never on what earlier
//! frames did, except that an already-visible cursor leaves offsets untouched.

use core_state::{ScreenSize, TextBuffer, Viewport};

pub fn scroll(vp: &mut Viewport, buffer: &TextBuffer, screen: ScreenSize) {
    vp.rx = buffer
        .row(vp.cursor.cy)
        .map_or(0, |row| row.cx_to_rx(vp.cursor.cx));

    let cy = vp.cursor.cy;
    if cy < vp.row_offset {
        vp.row_offset = cy;
    }
    if screen.rows > 0 && cy >= vp.row_offset + screen.rows {
        vp.row_offset = cy + 1 - screen.rows;
    }

    if vp.rx < vp.col_offset {
        vp.col_offset = vp.rx;
    }
    if screen.cols > 0 && vp.rx >= vp.col_offset + screen.cols {
        vp.col_offset = vp.rx + 1 - screen.cols;
    }
}
