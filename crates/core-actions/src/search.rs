//! Incremental search.
//!
//! A [`SearchSession`] lives for exactly one `find` call and is driven by the
//! prompt hook. Each keystroke scans at most `numrows` rows, starting one
//! step past the previous hit in the current direction and wrapping at both
//! ends. Arrow keys step between hits; any other key restarts from the top.
//! On a hit the cursor jumps to the match and `row_offset` is parked at
//! `numrows` so the next scroll pass puts the matching row at the top.

use crate::Frontend;
use crate::prompt::{PromptHook, prompt};
use anyhow::Result;
use core_events::{ENTER, Key};
use core_state::{EditorSession, MatchHighlight};

pub const SEARCH_PROMPT: &str = "Search: {} (Use ESC/Arrows/Enter)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    last_match: Option<usize>,
    direction: SearchDirection,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            last_match: None,
            direction: SearchDirection::Forward,
        }
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Prompt hook: update direction from `key`, then look for `query`.
    pub fn on_key(&mut self, session: &mut EditorSession, query: &str, key: Key) {
        session.search_match = None;

        match key {
            Key::Char(ENTER) | Key::Escape => {
                self.reset();
                return;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = SearchDirection::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = SearchDirection::Backward,
            _ => self.reset(),
        }
        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }
        let numrows = session.buffer.len();
        let mut current = self.last_match;
        for _ in 0..numrows {
            let next = step(current, self.direction, numrows);
            current = Some(next);
            let Some(row) = session.buffer.row(next) else {
                continue;
            };
            let Some(rx) = row.find_in_render(query.as_bytes()) else {
                continue;
            };
            self.last_match = Some(next);
            session.viewport.cursor.cy = next;
            session.viewport.cursor.cx = row.rx_to_cx(rx);
            session.viewport.row_offset = numrows;
            session.search_match = Some(MatchHighlight {
                row: next,
                rx,
                len: query.len(),
            });
            tracing::debug!(target: "actions.search", row = next, rx, direction = ?self.direction, "match");
            return;
        }
        tracing::trace!(target: "actions.search", query_len = query.len(), "no_match");
    }
}

/// Row index one step from `from` in `direction`, wrapping within `numrows`.
/// `None` means "before the first row" when moving forward.
fn step(from: Option<usize>, direction: SearchDirection, numrows: usize) -> usize {
    match (from, direction) {
        (None, SearchDirection::Forward) => 0,
        (None, SearchDirection::Backward) => numrows - 1,
        (Some(r), SearchDirection::Forward) => (r + 1) % numrows,
        (Some(0), SearchDirection::Backward) => numrows - 1,
        (Some(r), SearchDirection::Backward) => r - 1,
    }
}

/// Run an interactive search. Cancelling restores the cursor and scroll
/// offsets exactly as they were before the search started.
pub fn find<F: Frontend + ?Sized>(session: &mut EditorSession, frontend: &mut F) -> Result<()> {
    let saved = session.viewport;
    let mut search = SearchSession::new();
    let query = prompt(session, frontend, SEARCH_PROMPT, PromptHook::Search(&mut search))?;
    session.search_match = None;
    if query.is_none() {
        session.viewport = saved;
        tracing::debug!(target: "actions.search", "cancelled");
    }
    Ok(())
}
