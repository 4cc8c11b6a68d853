//! Logical key events produced by the input decoder.
//!
//! Plain bytes (including control chords such as `Ctrl-S` = `0x13`) are kept
//! as [`Key::Char`] so the dispatcher decides what they mean. Only multi-byte
//! terminal sequences and the lone escape byte get dedicated variants.

use std::fmt;

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 127;

/// Byte produced by holding Ctrl with `k` (`Ctrl-Q` = `ctrl_key(b'q')`).
pub const fn ctrl_key(k: u8) -> u8 {
    k & 0x1f
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any single byte other than a recognized escape sequence.
    Char(u8),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    /// Bare escape or an escape sequence that was not recognized.
    Escape,
}

impl Key {
    pub fn is_ctrl(self, k: u8) -> bool {
        self == Key::Char(ctrl_key(k))
    }

    /// Printable ASCII accepted by single-line prompts.
    pub fn printable(self) -> Option<u8> {
        match self {
            Key::Char(b) if (0x20..0x7f).contains(&b) => Some(b),
            _ => None,
        }
    }

    /// Keys that delete the byte left of the cursor.
    pub fn is_backspace(self) -> bool {
        matches!(self, Key::Char(BACKSPACE)) || self.is_ctrl(b'h')
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(b) if (0x20..0x7f).contains(b) => write!(f, "{}", *b as char),
            Key::Char(b) if *b < 0x20 => write!(f, "Ctrl-{}", (b | 0x40) as char),
            Key::Char(b) => write!(f, "0x{b:02x}"),
            other => write!(f, "{other:?}"),
        }
    }
}
