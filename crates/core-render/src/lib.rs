//! Frame composition.
//!
//! Every frame is a full repaint written as one transaction:
//!
//! 1. scroll reconciliation (`viewport::scroll`)
//! 2. hide cursor, home
//! 3. text rows (`~` past end of document, welcome banner on an empty one),
//!    each followed by clear-to-end-of-line
//! 4. inverse-video status bar
//! 5. message bar (only while the status message is younger than the TTL)
//! 6. cursor placement, show cursor
//!
//! Invariants:
//! - The frame writes exactly `screen.rows + 2` lines.
//! - Row output never exceeds `screen.cols` cells.
//! - Foreground color is always reset before leaving a row.

use anyhow::Result;
use core_state::{EditorSession, MatchHighlight};
use core_text::Row;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::time::{Duration, Instant};

pub mod status;
pub mod style;
pub mod viewport;
pub mod writer;

use status::{StatusContext, build_status};
use style::{StyleAttr, classify, control_symbol};
use writer::DrawBuffer;

pub struct ScreenRenderer {
    banner: String,
    message_ttl: Duration,
}

impl ScreenRenderer {
    pub fn new(banner: impl Into<String>, message_ttl: Duration) -> Self {
        Self {
            banner: banner.into(),
            message_ttl,
        }
    }

    /// Compose and write one frame.
    pub fn render<W: Write + ?Sized>(
        &self,
        session: &mut EditorSession,
        out: &mut W,
        now: Instant,
    ) -> Result<()> {
        let frame = self.compose(session, now)?;
        let bytes = frame.flush_to(out)?;
        tracing::trace!(
            target: "render",
            bytes,
            row_offset = session.viewport.row_offset,
            col_offset = session.viewport.col_offset,
            "frame"
        );
        Ok(())
    }

    /// Build the frame for `session` without writing it.
    pub fn compose(&self, session: &mut EditorSession, now: Instant) -> Result<DrawBuffer> {
        viewport::scroll(&mut session.viewport, &session.buffer, session.screen);

        let screen = session.screen;
        let mut d = DrawBuffer::with_capacity((screen.rows + 2) * (screen.cols + 8));
        d.queue(Hide)?;
        d.queue(MoveTo(0, 0))?;
        self.draw_rows(session, &mut d)?;
        draw_status_bar(session, &mut d)?;
        self.draw_message_bar(session, &mut d, now)?;
        let vp = &session.viewport;
        d.queue(MoveTo(to_u16(vp.screen_col()), to_u16(vp.screen_row())))?;
        d.queue(Show)?;
        Ok(d)
    }

    fn draw_rows(&self, session: &EditorSession, d: &mut DrawBuffer) -> Result<()> {
        let screen = session.screen;
        let buffer = &session.buffer;
        for y in 0..screen.rows {
            let file_row = y + session.viewport.row_offset;
            match buffer.row(file_row) {
                Some(row) => draw_text_row(
                    row,
                    file_row,
                    session.viewport.col_offset,
                    screen.cols,
                    session.search_match.as_ref(),
                    d,
                )?,
                None if buffer.is_empty() && y == screen.rows / 3 => {
                    self.draw_banner(screen.cols, d)
                }
                None => d.push_byte(b'~'),
            }
            d.queue(Clear(ClearType::UntilNewLine))?;
            d.push_str("\r\n");
        }
        Ok(())
    }

    fn draw_banner(&self, cols: usize, d: &mut DrawBuffer) {
        let text = &self.banner.as_bytes()[..self.banner.len().min(cols)];
        let mut padding = (cols - text.len()) / 2;
        if padding > 0 {
            d.push_byte(b'~');
            padding -= 1;
        }
        d.push_bytes(&vec![b' '; padding]);
        d.push_bytes(text);
    }

    fn draw_message_bar(
        &self,
        session: &EditorSession,
        d: &mut DrawBuffer,
        now: Instant,
    ) -> Result<()> {
        d.queue(Clear(ClearType::UntilNewLine))?;
        if let Some(msg) = &session.status
            && msg.is_visible(now, self.message_ttl)
        {
            let bytes = msg.text.as_bytes();
            d.push_bytes(&bytes[..bytes.len().min(session.screen.cols)]);
        }
        Ok(())
    }
}

fn draw_text_row(
    row: &Row,
    file_row: usize,
    col_offset: usize,
    cols: usize,
    hit: Option<&MatchHighlight>,
    d: &mut DrawBuffer,
) -> Result<()> {
    let render = row.render();
    let start = col_offset.min(render.len());
    let end = (start + cols).min(render.len());
    let mut current: Option<Color> = None;
    for (i, &byte) in render[start..end].iter().enumerate() {
        let attr = classify(byte, file_row, start + i, hit);
        if attr == StyleAttr::Control {
            d.queue(SetAttribute(Attribute::Reverse))?;
            d.push_byte(control_symbol(byte));
            d.queue(SetAttribute(Attribute::Reset))?;
            if let Some(color) = current {
                d.queue(SetForegroundColor(color))?;
            }
            continue;
        }
        let wanted = attr.foreground();
        if wanted != current {
            d.queue(SetForegroundColor(wanted.unwrap_or(Color::Reset)))?;
            current = wanted;
        }
        d.push_byte(byte);
    }
    if current.is_some() {
        d.queue(SetForegroundColor(Color::Reset))?;
    }
    Ok(())
}

fn draw_status_bar(session: &EditorSession, d: &mut DrawBuffer) -> Result<()> {
    let name = session.display_name();
    let ctx = StatusContext {
        file_name: &name,
        line_count: session.buffer.len(),
        modified: session.buffer.is_dirty(),
        line: session.viewport.cursor.cy,
    };
    d.queue(SetAttribute(Attribute::Reverse))?;
    d.push_bytes(&build_status(&ctx, session.screen.cols));
    d.queue(SetAttribute(Attribute::Reset))?;
    d.push_str("\r\n");
    Ok(())
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
