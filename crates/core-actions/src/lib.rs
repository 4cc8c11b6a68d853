//! Key dispatch and the modal workflows built on top of it.
//!
//! The dispatcher owns the only cross-keystroke state outside the session
//! (the quit confirmation countdown). Prompts and search run blocking
//! sub-loops against a [`Frontend`], which is the editor's whole view of the
//! terminal: draw a frame, then wait (bounded) for a key.

use anyhow::Result;
use core_events::Key;
use core_state::EditorSession;

pub mod dispatcher;
pub mod io_ops;
pub mod prompt;
pub mod search;

pub use dispatcher::{Editor, Outcome};
pub use prompt::{PromptHook, prompt};
pub use search::{SearchDirection, SearchSession, find};

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Screen and keyboard as seen by the editor loop.
pub trait Frontend {
    /// Draw one full frame of `session`.
    fn refresh(&mut self, session: &mut EditorSession) -> Result<()>;

    /// Wait a short, bounded time for the next key. `None` means the wait
    /// elapsed and the caller should redraw and try again.
    fn poll_key(&mut self) -> Result<Option<Key>>;
}

impl<F: Frontend + ?Sized> Frontend for &mut F {
    fn refresh(&mut self, session: &mut EditorSession) -> Result<()> {
        (**self).refresh(session)
    }

    fn poll_key(&mut self) -> Result<Option<Key>> {
        (**self).poll_key()
    }
}
