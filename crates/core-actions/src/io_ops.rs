//! Document load and save.
//!
//! Loading is a startup-only operation and any failure is fatal to the
//! caller. Saving never fails the editor: the outcome is reported through
//! the status message and the dirty counter is only reset after every byte
//! reached the file.

use crate::Frontend;
use crate::prompt::{PromptHook, prompt};
use anyhow::{Context, Result};
use core_state::{EditorSession, TextBuffer, split_lines};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SAVE_AS_PROMPT: &str = "Save as: {} (ESC to cancel)";

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no file name")]
    NoFileName,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Read `path` into a clean buffer.
pub fn load_document(path: &Path) -> Result<TextBuffer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to open {}", path.display()))?;
    let lines = split_lines(&bytes);
    tracing::info!(target: "io", bytes = bytes.len(), rows = lines.len(), "file_loaded");
    Ok(TextBuffer::from_lines(lines))
}

/// Replace the contents of `path` with `bytes`, creating it (mode 0644 on
/// unix) when missing. Returns the number of bytes written.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> std::io::Result<usize> {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    let mut file = opts.open(path)?;
    file.set_len(bytes.len() as u64)?;
    file.write_all(bytes)?;
    Ok(bytes.len())
}

/// Serialize the buffer to the session's file and mark it clean.
pub fn write_document(session: &mut EditorSession) -> Result<usize, SaveError> {
    let path = session.file_name.as_deref().ok_or(SaveError::NoFileName)?;
    let written = write_bytes(path, &session.buffer.to_bytes())?;
    session.buffer.mark_clean();
    Ok(written)
}

/// Interactive save: asks for a file name first when the document has none.
pub fn save<F: Frontend + ?Sized>(session: &mut EditorSession, frontend: &mut F) -> Result<()> {
    if session.file_name.is_none() {
        match prompt(session, frontend, SAVE_AS_PROMPT, PromptHook::None)? {
            Some(name) => session.file_name = Some(PathBuf::from(name)),
            None => {
                session.set_status("Save aborted");
                return Ok(());
            }
        }
    }
    match write_document(session) {
        Ok(n) => {
            tracing::info!(target: "io", bytes = n, "file_saved");
            session.set_status(format!("{n} bytes written to disk"));
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_save_failed");
            session.set_status(format!("Can't save! I/O error: {e}"));
        }
    }
    Ok(())
}
