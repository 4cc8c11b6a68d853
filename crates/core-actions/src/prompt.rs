//! Single-line input captured in the message bar.
//!
//! `prompt` blocks in its own draw/read loop until the user confirms a
//! non-empty line with Enter or cancels with Escape. The hook sees every key
//! that reaches the loop, including the terminating one, so a search session
//! can clean up after itself.

use crate::Frontend;
use crate::search::SearchSession;
use anyhow::Result;
use core_events::{ENTER, Key};
use core_state::EditorSession;

/// Per-keystroke callback attached to a prompt.
pub enum PromptHook<'a> {
    None,
    Search(&'a mut SearchSession),
}

impl PromptHook<'_> {
    fn on_key(&mut self, session: &mut EditorSession, input: &str, key: Key) {
        match self {
            PromptHook::None => {}
            PromptHook::Search(search) => search.on_key(session, input, key),
        }
    }
}

/// Substitute the current input into the first `{}` of `template`.
pub fn render_template(template: &str, input: &str) -> String {
    template.replacen("{}", input, 1)
}

/// Read a line. Returns `Ok(None)` when cancelled.
pub fn prompt<F: Frontend + ?Sized>(
    session: &mut EditorSession,
    frontend: &mut F,
    template: &str,
    mut hook: PromptHook<'_>,
) -> Result<Option<String>> {
    let mut input = String::new();
    loop {
        session.set_status(render_template(template, &input));
        frontend.refresh(session)?;
        let Some(key) = frontend.poll_key()? else {
            continue;
        };

        if key == Key::Delete || key.is_backspace() {
            input.pop();
        } else if key == Key::Escape {
            session.set_status("");
            hook.on_key(session, &input, key);
            return Ok(None);
        } else if key == Key::Char(ENTER) {
            if !input.is_empty() {
                session.set_status("");
                hook.on_key(session, &input, key);
                return Ok(Some(input));
            }
        } else if let Some(byte) = key.printable() {
            input.push(char::from(byte));
        }
        hook.on_key(session, &input, key);
    }
}
