//! Terminal backend abstraction and crossterm implementation.
//!
//! Three collaborators live here: raw-mode entry/exit (`TerminalBackend`),
//! geometry (`window_size`), and the byte channels (`ByteSource` plus any
//! `std::io::Write` sink). The editor core only talks to the traits.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub mod source;
pub use source::{ByteSource, StdinSource};

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("terminal did not report a usable window size")]
    WindowSize,
    #[error("input channel closed")]
    InputClosed,
}

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Raw byte mode: no echo, no line buffering, no signal keys, no input or
/// output translation.
pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
            tracing::debug!(target: "terminal", "raw_mode_enabled");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "terminal", "raw_mode_restored");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a> TerminalGuard<'a> {
    /// Restore the terminal now instead of at drop (used before printing fatal errors).
    pub fn release(mut self) -> Result<()> {
        self.active = false;
        self.backend.leave()
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// Best-effort restore for a panic hook, which runs before any guard unwinds.
pub fn emergency_restore() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

/// Query the terminal geometry as `(rows, cols)`.
pub fn window_size() -> Result<(u16, u16)> {
    let (cols, rows) = crossterm::terminal::size()?;
    validate_size(rows, cols)
}

fn validate_size(rows: u16, cols: u16) -> Result<(u16, u16)> {
    if rows == 0 || cols == 0 {
        return Err(TerminalError::WindowSize.into());
    }
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_window_is_rejected() {
        let err = validate_size(0, 80).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TerminalError>(),
            Some(TerminalError::WindowSize)
        ));
        assert!(validate_size(24, 0).is_err());
        assert_eq!(validate_size(24, 80).unwrap(), (24, 80));
    }

    #[test]
    fn backend_starts_outside_raw_mode() {
        let mut backend = CrosstermBackend::new();
        // leave() on a backend that never entered must be a no-op.
        backend.leave().unwrap();
        assert!(!backend.entered);
    }
}
