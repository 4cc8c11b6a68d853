#![allow(dead_code)] // Each test binary uses a subset of helpers.

use anyhow::Result;
use core_actions::{Editor, Frontend, Outcome};
use core_events::Key;
use core_state::{Cursor, EditorSession, ScreenSize, TextBuffer};
use std::collections::VecDeque;

/// Frontend fed from a key script; records the cursor and message at every
/// refresh so tests can assert on intermediate frames.
#[derive(Default)]
pub struct Scripted {
    keys: VecDeque<Key>,
    pub frames: Vec<(Cursor, String)>,
}

impl Scripted {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Frontend for Scripted {
    fn refresh(&mut self, session: &mut EditorSession) -> Result<()> {
        let msg = session.status_text().unwrap_or_default().to_string();
        self.frames.push((session.cursor(), msg));
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<Key>> {
        match self.keys.pop_front() {
            Some(k) => Ok(Some(k)),
            None => anyhow::bail!("key script exhausted"),
        }
    }
}

pub fn text(s: &str) -> Vec<Key> {
    s.bytes().map(Key::Char).collect()
}

pub fn session(lines: &[&str]) -> EditorSession {
    EditorSession::new(
        TextBuffer::from_lines(lines.iter().copied()),
        ScreenSize::new(10, 40),
    )
}

/// Drive the editor the way the main loop does until the script runs dry or
/// the editor asks to quit.
pub fn run(editor: &mut Editor, session: &mut EditorSession, fe: &mut Scripted) -> Outcome {
    loop {
        fe.refresh(session).unwrap();
        let Some(key) = fe.keys.pop_front() else {
            return Outcome::Continue;
        };
        if editor.handle_key(key, session, fe).unwrap() == Outcome::Quit {
            return Outcome::Quit;
        }
    }
}

pub fn rows(session: &EditorSession) -> Vec<String> {
    session
        .buffer
        .rows()
        .iter()
        .map(|r| String::from_utf8_lossy(r.chars()).into_owned())
        .collect()
}
