//! Cursor movement.
//!
//! Horizontal moves wrap across line boundaries; vertical moves keep `cx`
//! but clamp it to the destination row. Every move ends with that clamp so
//! the cursor never points past the end of its row.

use core_state::{Cursor, TextBuffer, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

pub fn move_cursor(buffer: &TextBuffer, cur: &mut Cursor, dir: Direction) {
    let row_len = buffer.row(cur.cy).map(|r| r.len());
    match dir {
        Direction::Left => {
            if cur.cx > 0 {
                cur.cx -= 1;
            } else if cur.cy > 0 {
                cur.cy -= 1;
                cur.cx = buffer.row_len(cur.cy);
            }
        }
        Direction::Right => match row_len {
            Some(len) if cur.cx < len => cur.cx += 1,
            Some(len) if cur.cx == len => {
                cur.cy += 1;
                cur.cx = 0;
            }
            _ => {}
        },
        Direction::Up => cur.cy = cur.cy.saturating_sub(1),
        Direction::Down => {
            if cur.cy < buffer.len() {
                cur.cy += 1;
            }
        }
    }
    cur.cx = cur.cx.min(buffer.row_len(cur.cy));
}

pub fn line_start(cur: &mut Cursor) {
    cur.cx = 0;
}

pub fn line_end(buffer: &TextBuffer, cur: &mut Cursor) {
    if cur.cy < buffer.len() {
        cur.cx = buffer.row_len(cur.cy);
    }
}

/// PageUp/PageDown: jump to the top (bottom) visible row, then move a whole
/// screen further.
pub fn page(buffer: &TextBuffer, vp: &mut Viewport, rows: usize, dir: Direction) {
    match dir {
        Direction::Up => vp.cursor.cy = vp.row_offset,
        Direction::Down => {
            vp.cursor.cy = (vp.row_offset + rows)
                .saturating_sub(1)
                .min(buffer.len());
        }
        Direction::Left | Direction::Right => return,
    }
    for _ in 0..rows {
        move_cursor(buffer, &mut vp.cursor, dir);
    }
}
