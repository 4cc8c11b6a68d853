use core_render::ScreenRenderer;
use core_state::{Cursor, EditorSession, ScreenSize, TextBuffer};
use proptest::prelude::*;
use std::time::{Duration, Instant};

/// Drop CSI sequences (`ESC [ params final`) leaving only drawn text.
fn strip_csi(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'[') {
            i += 2;
            while i < bytes.len() && !(0x40..=0x7e).contains(&bytes[i]) {
                i += 1;
            }
            i += 1;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

fn line() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![Just(b'\t'), 0x20u8..0x7f], 0..40)
}

proptest! {
    #[test]
    fn frame_fits_screen_and_keeps_cursor_visible(
        lines in prop::collection::vec(line(), 0..30),
        rows in 1usize..12,
        cols in 1usize..50,
        cy in 0usize..31,
        cx in 0usize..41,
    ) {
        let buffer = TextBuffer::from_lines(lines);
        let cy = cy.min(buffer.len());
        let cx = cx.min(buffer.row_len(cy));
        let mut session = EditorSession::new(buffer, ScreenSize::new(rows, cols));
        session.viewport.cursor = Cursor::new(cx, cy);

        let renderer = ScreenRenderer::new("Tilde editor -- version 0.0.1", Duration::from_secs(5));
        let frame = renderer.compose(&mut session, Instant::now()).unwrap().into_bytes();
        let text = strip_csi(&frame);

        let parts: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();
        prop_assert_eq!(parts.len(), rows + 2);
        for part in &parts[..rows + 1] {
            let visible = part.strip_suffix(b"\r").unwrap_or(part);
            prop_assert!(visible.len() <= cols, "line wider than screen: {}", visible.len());
        }
        prop_assert!(session.viewport.screen_row() < rows);
        prop_assert!(session.viewport.screen_col() < cols);
    }
}
