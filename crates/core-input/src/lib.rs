//! Terminal byte stream -> logical key decoder.
//!
//! Decoding is a small explicit state table ([`step`]) driven by
//! [`InputDecoder::next_key`]. Recognized sequences:
//!
//! | bytes            | key                                    |
//! |------------------|----------------------------------------|
//! | `ESC [ A/B/C/D`  | arrows up/down/right/left              |
//! | `ESC [ H/F`      | Home / End                             |
//! | `ESC [ n ~`      | 1,7 Home; 3 Delete; 4,8 End; 5/6 PgUp/PgDn |
//! | `ESC O H/F`      | Home / End                             |
//!
//! Anything else after an escape, or a tail byte that does not arrive within
//! the escape timeout, yields a bare [`Key::Escape`]; the consumed tail bytes
//! are dropped. An unrecognized first tail byte still consumes a second one,
//! so `ESC x a` is a single `Escape`. Every other byte is passed through as [`Key::Char`].

use anyhow::Result;
use core_events::{ESC, Key};
use core_terminal::ByteSource;
use std::time::Duration;

/// Decoder position inside a (possible) escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    Ground,
    /// Saw `ESC`.
    Escape,
    /// Saw `ESC [`.
    Csi,
    /// Saw `ESC [ <digit>`.
    CsiParam(u8),
    /// Saw `ESC O`.
    Ss3,
    /// Saw `ESC` and an unrecognized byte; one more byte is swallowed.
    EscapeOther,
}

/// Outcome of feeding one byte to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pending(DecodeState),
    Emit(Key),
}

/// Transition table: (state, byte) -> next state or emitted key.
pub fn step(state: DecodeState, byte: u8) -> Step {
    use DecodeState::*;
    match (state, byte) {
        (Ground, ESC) => Step::Pending(Escape),
        (Ground, b) => Step::Emit(Key::Char(b)),

        (Escape, b'[') => Step::Pending(Csi),
        (Escape, b'O') => Step::Pending(Ss3),
        (Escape, _) => Step::Pending(EscapeOther),

        (Csi, d @ b'0'..=b'9') => Step::Pending(CsiParam(d)),
        (Csi, b'A') => Step::Emit(Key::ArrowUp),
        (Csi, b'B') => Step::Emit(Key::ArrowDown),
        (Csi, b'C') => Step::Emit(Key::ArrowRight),
        (Csi, b'D') => Step::Emit(Key::ArrowLeft),
        (Csi, b'H') => Step::Emit(Key::Home),
        (Csi, b'F') => Step::Emit(Key::End),

        (CsiParam(d), b'~') => Step::Emit(match d {
            b'1' | b'7' => Key::Home,
            b'3' => Key::Delete,
            b'4' | b'8' => Key::End,
            b'5' => Key::PageUp,
            b'6' => Key::PageDown,
            _ => Key::Escape,
        }),

        (Ss3, b'H') => Step::Emit(Key::Home),
        (Ss3, b'F') => Step::Emit(Key::End),

        _ => Step::Emit(Key::Escape),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputTimeouts {
    /// Wait for the first byte of a key before handing control back.
    pub poll: Duration,
    /// Wait for each tail byte of an escape sequence.
    pub escape: Duration,
}

impl Default for InputTimeouts {
    fn default() -> Self {
        Self {
            poll: Duration::from_millis(100),
            escape: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputDecoder {
    timeouts: InputTimeouts,
}

impl InputDecoder {
    pub fn new(timeouts: InputTimeouts) -> Self {
        Self { timeouts }
    }

    /// Read one key if a byte arrives within the poll timeout.
    pub fn poll_key<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<Option<Key>> {
        let Some(first) = src.read_byte(self.timeouts.poll)? else {
            return Ok(None);
        };
        let mut state = match step(DecodeState::Ground, first) {
            Step::Emit(key) => return Ok(Some(key)),
            Step::Pending(next) => next,
        };
        loop {
            let Some(byte) = src.read_byte(self.timeouts.escape)? else {
                tracing::trace!(target: "input.decode", ?state, "escape_tail_timeout");
                return Ok(Some(Key::Escape));
            };
            match step(state, byte) {
                Step::Emit(key) => {
                    if key == Key::Escape {
                        tracing::trace!(target: "input.decode", ?state, byte, "unrecognized_sequence");
                    }
                    return Ok(Some(key));
                }
                Step::Pending(next) => state = next,
            }
        }
    }

    /// Block until a key is decoded, retrying across poll timeouts.
    pub fn next_key<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<Key> {
        loop {
            if let Some(key) = self.poll_key(src)? {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_plain_and_control_bytes() {
        assert_eq!(step(DecodeState::Ground, b'a'), Step::Emit(Key::Char(b'a')));
        assert_eq!(step(DecodeState::Ground, 0x11), Step::Emit(Key::Char(0x11)));
        assert_eq!(step(DecodeState::Ground, 0xc3), Step::Emit(Key::Char(0xc3)));
        assert_eq!(
            step(DecodeState::Ground, ESC),
            Step::Pending(DecodeState::Escape)
        );
    }

    #[test]
    fn table_tilde_forms() {
        let cases = [
            (b'1', Key::Home),
            (b'3', Key::Delete),
            (b'4', Key::End),
            (b'5', Key::PageUp),
            (b'6', Key::PageDown),
            (b'7', Key::Home),
            (b'8', Key::End),
            (b'2', Key::Escape),
        ];
        for (digit, key) in cases {
            assert_eq!(
                step(DecodeState::CsiParam(digit), b'~'),
                Step::Emit(key),
                "digit {}",
                digit as char
            );
        }
    }

    #[test]
    fn table_digit_without_tilde_is_escape() {
        assert_eq!(
            step(DecodeState::CsiParam(b'3'), b'x'),
            Step::Emit(Key::Escape)
        );
    }

    #[test]
    fn table_ss3_only_home_end() {
        assert_eq!(step(DecodeState::Ss3, b'H'), Step::Emit(Key::Home));
        assert_eq!(step(DecodeState::Ss3, b'F'), Step::Emit(Key::End));
        assert_eq!(step(DecodeState::Ss3, b'A'), Step::Emit(Key::Escape));
    }

    #[test]
    fn table_unknown_escape_swallows_two_tail_bytes() {
        assert_eq!(
            step(DecodeState::Escape, b'x'),
            Step::Pending(DecodeState::EscapeOther)
        );
        assert_eq!(
            step(DecodeState::EscapeOther, b'a'),
            Step::Emit(Key::Escape)
        );
        assert_eq!(
            step(DecodeState::EscapeOther, b'['),
            Step::Emit(Key::Escape)
        );
    }
}
