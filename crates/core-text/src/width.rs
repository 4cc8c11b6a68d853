//! Buffer column <-> render column mapping.
//!
//! Every byte occupies one display cell except the horizontal tab, which
//! advances to the next multiple of [`TAB_STOP`]. The functions here are pure
//! and operate on a row's raw bytes, so callers can map coordinates without
//! holding any editor state.
//!
//! Invariants:
//! - `rx_to_cx(chars, cx_to_rx(chars, cx)) == cx` for every `cx <= chars.len()`.
//! - `cx_to_rx` is monotonic in `cx`.
//! - Out-of-range columns clamp to the row length instead of panicking.

/// Fixed tab stop used for render expansion.
pub const TAB_STOP: usize = 8;

#[inline]
fn advance(rx: usize, byte: u8) -> usize {
    if byte == b'\t' {
        rx + (TAB_STOP - 1) - (rx % TAB_STOP) + 1
    } else {
        rx + 1
    }
}

/// Render column of the cell where buffer column `cx` starts.
pub fn cx_to_rx(chars: &[u8], cx: usize) -> usize {
    let end = cx.min(chars.len());
    chars[..end].iter().fold(0, |rx, &b| advance(rx, b))
}

/// Buffer column whose rendered span covers render column `rx`.
///
/// Returns `chars.len()` when `rx` lies beyond the rendered line.
pub fn rx_to_cx(chars: &[u8], rx: usize) -> usize {
    let mut cur_rx = 0;
    for (cx, &b) in chars.iter().enumerate() {
        cur_rx = advance(cur_rx, b);
        if cur_rx > rx {
            return cx;
        }
    }
    chars.len()
}

/// Expand tabs into spaces up to the next tab stop; other bytes pass through.
pub fn expand_tabs(chars: &[u8]) -> Vec<u8> {
    let tabs = chars.iter().filter(|&&b| b == b'\t').count();
    let mut out = Vec::with_capacity(chars.len() + tabs * (TAB_STOP - 1));
    for &b in chars {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % TAB_STOP != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tab_expands_to_next_stop() {
        let r = expand_tabs(b"a\tb");
        assert_eq!(r, b"a       b");
        assert_eq!(r.len(), 9);
        assert_eq!(cx_to_rx(b"a\tb", 1), 1);
        assert_eq!(cx_to_rx(b"a\tb", 2), 8);
    }

    #[test]
    fn leading_tab_fills_full_stop() {
        assert_eq!(expand_tabs(b"\tx"), b"        x");
        assert_eq!(cx_to_rx(b"\tx", 1), TAB_STOP);
    }

    #[test]
    fn rx_inside_tab_span_maps_to_tab() {
        // Render columns 1..8 all belong to the tab at buffer column 1.
        for rx in 1..8 {
            assert_eq!(rx_to_cx(b"a\tb", rx), 1, "rx={rx}");
        }
        assert_eq!(rx_to_cx(b"a\tb", 8), 2);
    }

    #[test]
    fn rx_past_end_clamps_to_len() {
        assert_eq!(rx_to_cx(b"abc", 40), 3);
        assert_eq!(rx_to_cx(b"", 0), 0);
    }

    #[test]
    fn cx_past_end_clamps() {
        assert_eq!(cx_to_rx(b"ab", 10), 2);
    }

    proptest! {
        #[test]
        fn cx_rx_round_trip(chars in proptest::collection::vec(prop_oneof![Just(b'\t'), 0x20u8..0x7f], 0..64), pick in 0usize..65) {
            let cx = pick.min(chars.len());
            prop_assert_eq!(rx_to_cx(&chars, cx_to_rx(&chars, cx)), cx);
        }

        #[test]
        fn render_length_matches_mapping(chars in proptest::collection::vec(prop_oneof![Just(b'\t'), 0x20u8..0x7f], 0..64)) {
            prop_assert_eq!(expand_tabs(&chars).len(), cx_to_rx(&chars, chars.len()));
        }
    }
}
