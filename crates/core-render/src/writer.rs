//! Per-frame draw buffer.
//!
//! A frame is composed into one append-only byte vector (crossterm commands
//! are queued into it as ANSI text) and handed to the sink with a single
//! `write_all` + `flush`. `flush_to` consumes the buffer, so a flushed frame
//! can never be appended to or read again.

use crossterm::{Command, QueueableCommand};
use std::io::{self, Write};

#[derive(Default)]
pub struct DrawBuffer {
    bytes: Vec<u8>,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(cap),
        }
    }

    /// Append the ANSI form of a crossterm command.
    pub fn queue(&mut self, cmd: impl Command) -> io::Result<()> {
        self.bytes.queue(cmd)?;
        Ok(())
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn push_byte(&mut self, b: u8) {
        self.bytes.push(b);
    }

    pub fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    /// Write the whole frame in one transaction and release the buffer.
    pub fn flush_to<W: Write + ?Sized>(self, out: &mut W) -> io::Result<usize> {
        out.write_all(&self.bytes)?;
        out.flush()?;
        Ok(self.bytes.len())
    }

    /// Finished frame bytes without writing them anywhere.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
