//! Keystroke dispatch.
//!
//! Control chords and navigation keys map to editor commands; every other
//! byte is inserted into the document as-is. A bare line feed (Ctrl-J) splits
//! the row like Enter, so a row never holds a line terminator. Quitting a modified document
//! needs `quit_times` extra presses of Ctrl-Q in a row, and any other key
//! rearms the countdown.

use crate::Frontend;
use crate::io_ops;
use crate::search;
use anyhow::Result;
use core_events::{ENTER, Key, ctrl_key};
use core_state::EditorSession;

pub mod motion;

pub use motion::Direction;

/// What the main loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Editor {
    quit_times: u8,
    quit_remaining: u8,
}

impl Editor {
    pub fn new(quit_times: u8) -> Self {
        Self {
            quit_times,
            quit_remaining: quit_times,
        }
    }

    pub fn quit_remaining(&self) -> u8 {
        self.quit_remaining
    }

    pub fn handle_key<F: Frontend + ?Sized>(
        &mut self,
        key: Key,
        session: &mut EditorSession,
        frontend: &mut F,
    ) -> Result<Outcome> {
        tracing::trace!(target: "actions.dispatch", %key, "key");

        if key == Key::Char(ctrl_key(b'q')) {
            if session.buffer.is_dirty() && self.quit_remaining > 0 {
                session.set_status(format!(
                    "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                    self.quit_remaining
                ));
                self.quit_remaining -= 1;
                return Ok(Outcome::Continue);
            }
            tracing::info!(target: "actions.dispatch", dirty = session.buffer.dirty(), "quit");
            return Ok(Outcome::Quit);
        }

        match key {
            Key::Char(ENTER | b'\n') => {
                let (buffer, cur) = session.edit_parts();
                buffer.insert_newline(cur);
            }
            Key::Char(b) if b == ctrl_key(b's') => io_ops::save(session, frontend)?,
            Key::Char(b) if b == ctrl_key(b'f') => search::find(session, frontend)?,
            Key::Char(b) if b == ctrl_key(b'l') => {}
            Key::Escape => {}
            Key::Delete => {
                let (buffer, cur) = session.edit_parts();
                motion::move_cursor(buffer, cur, Direction::Right);
                buffer.delete_char(cur);
            }
            k if k.is_backspace() => {
                let (buffer, cur) = session.edit_parts();
                buffer.delete_char(cur);
            }
            Key::Home => motion::line_start(&mut session.viewport.cursor),
            Key::End => motion::line_end(&session.buffer, &mut session.viewport.cursor),
            Key::PageUp => motion::page(
                &session.buffer,
                &mut session.viewport,
                session.screen.rows,
                Direction::Up,
            ),
            Key::PageDown => motion::page(
                &session.buffer,
                &mut session.viewport,
                session.screen.rows,
                Direction::Down,
            ),
            Key::ArrowLeft => move_arrow(session, Direction::Left),
            Key::ArrowRight => move_arrow(session, Direction::Right),
            Key::ArrowUp => move_arrow(session, Direction::Up),
            Key::ArrowDown => move_arrow(session, Direction::Down),
            Key::Char(b) => {
                let (buffer, cur) = session.edit_parts();
                buffer.insert_char(cur, b);
            }
        }

        self.quit_remaining = self.quit_times;
        Ok(Outcome::Continue)
    }
}

fn move_arrow(session: &mut EditorSession, dir: Direction) {
    motion::move_cursor(&session.buffer, &mut session.viewport.cursor, dir);
}
