use std::io::{self, Write};

use gcast_core::frame::GlyphGrid;

/// Écrit la grille sur un flux texte en séquences ANSI truecolor.
///
/// One foreground escape per color run, one line per grid row, a single
/// reset at stream end. Cells suppressed as background still print their
/// space glyph, so every row keeps a stable column count.
///
/// # Errors
/// Propagates write errors from the underlying stream.
///
/// # Example
/// ```
/// use gcast_core::frame::{GlyphCell, GlyphGrid};
/// use gcast_render::term::write_grid;
///
/// let mut grid = GlyphGrid::new(2, 1);
/// grid.set(0, 0, GlyphCell { ch: '#', fg: (255, 0, 0) });
/// let mut out = Vec::new();
/// write_grid(&mut out, &grid).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("\x1b[38;2;255;0;0m#"));
/// assert!(text.ends_with("\x1b[0m"));
/// ```
pub fn write_grid<W: Write>(out: &mut W, grid: &GlyphGrid) -> io::Result<()> {
    let mut current: Option<(u8, u8, u8)> = None;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let cell = grid.get(x, y);
            if current != Some(cell.fg) {
                write!(out, "\x1b[38;2;{};{};{}m", cell.fg.0, cell.fg.1, cell.fg.2)?;
                current = Some(cell.fg);
            }
            write!(out, "{}", cell.ch)?;
        }
        out.write_all(b"\n")?;
    }
    out.write_all(b"\x1b[0m")?;
    out.flush()
}
