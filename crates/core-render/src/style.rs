//! Per-cell render decoration.
//!
//! Not a highlighting engine: a cell is classified from its own byte plus the
//! optional search-match span, and the row emitter only issues a color
//! command when the class changes between neighbouring cells.

use core_state::MatchHighlight;
use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAttr {
    Normal,
    Digit,
    Match,
    /// Non-printable byte, drawn as an inverted symbol.
    Control,
}

impl StyleAttr {
    pub fn foreground(self) -> Option<Color> {
        match self {
            StyleAttr::Digit => Some(Color::DarkRed),
            StyleAttr::Match => Some(Color::DarkBlue),
            StyleAttr::Normal | StyleAttr::Control => None,
        }
    }
}

/// Classify the render byte at (`row`, `rx`).
pub fn classify(byte: u8, row: usize, rx: usize, hit: Option<&MatchHighlight>) -> StyleAttr {
    if is_control(byte) {
        StyleAttr::Control
    } else if hit.is_some_and(|m| m.contains(row, rx)) {
        StyleAttr::Match
    } else if byte.is_ascii_digit() {
        StyleAttr::Digit
    } else {
        StyleAttr::Normal
    }
}

pub fn is_control(byte: u8) -> bool {
    byte < 0x20 || byte == 0x7f
}

/// Visible stand-in for a control byte: `@`..`_` for 0..31, `?` otherwise.
pub fn control_symbol(byte: u8) -> u8 {
    if byte < 0x20 { b'@' + byte } else { b'?' }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_colored() {
        assert_eq!(classify(b'7', 0, 0, None), StyleAttr::Digit);
        assert_eq!(classify(b'x', 0, 0, None), StyleAttr::Normal);
        assert_eq!(StyleAttr::Digit.foreground(), Some(Color::DarkRed));
        assert_eq!(StyleAttr::Normal.foreground(), None);
    }

    #[test]
    fn match_span_overrides_digit() {
        let m = MatchHighlight {
            row: 1,
            rx: 2,
            len: 2,
        };
        assert_eq!(classify(b'1', 1, 2, Some(&m)), StyleAttr::Match);
        assert_eq!(classify(b'1', 1, 4, Some(&m)), StyleAttr::Digit);
        assert_eq!(classify(b'a', 0, 2, Some(&m)), StyleAttr::Normal);
    }

    #[test]
    fn control_bytes_get_symbols() {
        assert_eq!(classify(0x01, 0, 0, None), StyleAttr::Control);
        assert_eq!(control_symbol(0x01), b'A');
        assert_eq!(control_symbol(0x00), b'@');
        assert_eq!(control_symbol(0x7f), b'?');
    }
}
