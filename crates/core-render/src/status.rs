//! Status bar composition.
//!
//! Format: `<name> - <N> lines[ (modified)]` on the left and
//! `<line>/<total>` on the right, space-padded to exactly fill the width.
//! `<name>` is the file name truncated to 20 bytes or `[No Name]`. When both
//! parts do not fit, the right part is dropped and the left part is clipped.

/// Inputs for one status bar.
pub struct StatusContext<'a> {
    pub file_name: &'a str,
    pub line_count: usize,
    pub modified: bool,
    /// 0-based cursor row.
    pub line: usize,
}

pub const NAME_MAX: usize = 20;

pub fn left_part(ctx: &StatusContext<'_>) -> Vec<u8> {
    let name = ctx.file_name.as_bytes();
    let mut out = name[..name.len().min(NAME_MAX)].to_vec();
    out.extend_from_slice(format!(" - {} lines", ctx.line_count).as_bytes());
    if ctx.modified {
        out.extend_from_slice(b" (modified)");
    }
    out
}

pub fn right_part(ctx: &StatusContext<'_>) -> Vec<u8> {
    format!("{}/{}", ctx.line + 1, ctx.line_count).into_bytes()
}

/// Lay out the bar into exactly `width` bytes.
pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> Vec<u8> {
    let mut out = left_part(ctx);
    out.truncate(width);
    let right = right_part(ctx);
    if out.len() + right.len() <= width {
        out.resize(width - right.len(), b' ');
        out.extend_from_slice(&right);
    } else {
        out.resize(width, b' ');
    }
    out
}
