use gcast_core::CoreError;
use gcast_core::color::LinearLut;
use gcast_core::config::ConvertConfig;
use gcast_core::frame::{BackgroundMask, GlyphCell, GlyphGrid, PixelBuffer};
use gcast_core::ramp::{EMPTY_GLYPH, GlyphRamp};
use rayon::prelude::*;

use crate::reduce;

/// Build the glyph grid for an image.
///
/// Orchestrates the block reducer and the density mapping: one cell per
/// grid position, representative color as foreground, glyph chosen from
/// the ramp by linear-light luminance. A pure-black representative color
/// forces the empty glyph, which is how suppressed background reaches the
/// grid without a separate code path. Cells whose pixels are
/// majority-masked are forced empty directly.
///
/// Fail-fast: on error no partially populated grid is observable.
///
/// # Errors
/// [`CoreError::InvalidGrid`] when the configured cell size yields zero
/// grid rows or columns for this image.
///
/// # Example
/// ```
/// use gcast_core::config::ConvertConfig;
/// use gcast_core::frame::PixelBuffer;
/// use gcast_core::ramp::GlyphRamp;
/// use gcast_ascii::convert::build_grid;
///
/// let frame = PixelBuffer::new(16, 24);
/// let config = ConvertConfig::default();
/// let ramp = GlyphRamp::new(&config.ramp);
/// let grid = build_grid(&frame, &config, &ramp, None).unwrap();
/// assert_eq!((grid.width, grid.height), (2, 2));
/// ```
pub fn build_grid(
    frame: &PixelBuffer,
    config: &ConvertConfig,
    ramp: &GlyphRamp,
    mask: Option<&BackgroundMask>,
) -> Result<GlyphGrid, CoreError> {
    let (gw, gh) = reduce::grid_dims(
        frame.width,
        frame.height,
        config.cell_width,
        config.cell_height,
    );
    if gw == 0 || gh == 0 {
        return Err(CoreError::InvalidGrid {
            width: frame.width,
            height: frame.height,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
        });
    }

    let mask = mask.filter(|m| {
        let fits = m.width == frame.width && m.height == frame.height;
        if !fits {
            log::warn!(
                "mask {}×{} does not match image {}×{}, ignoring it",
                m.width,
                m.height,
                frame.width,
                frame.height
            );
        }
        fits
    });

    let gw = gw.min(u32::from(u16::MAX)) as u16;
    let gh = gh.min(u32::from(u16::MAX)) as u16;
    let lut = LinearLut::new();
    let mut grid = GlyphGrid::new(gw, gh);

    grid.cells
        .par_chunks_mut(gw as usize)
        .enumerate()
        .for_each(|(cy, row)| {
            for (cx, cell) in row.iter_mut().enumerate() {
                let x0 = cx as u32 * config.cell_width;
                let y0 = cy as u32 * config.cell_height;

                if let Some(m) = mask {
                    if cell_is_background(m, x0, y0, config.cell_width, config.cell_height) {
                        *cell = GlyphCell::default();
                        continue;
                    }
                }

                let stats = reduce::reduce_cell(
                    frame,
                    &lut,
                    x0,
                    y0,
                    config.cell_width,
                    config.cell_height,
                    config.brightness,
                );
                *cell = if stats.color == (0, 0, 0) {
                    GlyphCell {
                        ch: EMPTY_GLYPH,
                        fg: (0, 0, 0),
                    }
                } else {
                    GlyphCell {
                        ch: ramp.glyph_for(stats.luminance),
                        fg: stats.color,
                    }
                };
            }
        });

    Ok(grid)
}

/// More than half of the cell's pixels masked ⇒ the cell is background.
fn cell_is_background(
    mask: &BackgroundMask,
    x0: u32,
    y0: u32,
    cell_width: u32,
    cell_height: u32,
) -> bool {
    let x1 = x0.saturating_add(cell_width).min(mask.width);
    let y1 = y0.saturating_add(cell_height).min(mask.height);
    let mut masked = 0u32;
    let mut total = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            total += 1;
            if mask.get(x, y) {
                masked += 1;
            }
        }
    }
    masked * 2 > total
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcast_core::ramp::RAMP_CLASSIC;

    fn solid(width: u32, height: u32, rgb: (u8, u8, u8)) -> PixelBuffer {
        let mut frame = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                frame.set_rgb(x, y, rgb);
            }
        }
        frame
    }

    #[test]
    fn solid_gray_image_yields_a_uniform_mid_dark_grid() {
        // 16×24 at 8×12 cells: 2×2 grid. sRGB 128 has linear luminance
        // ≈0.216, which lands on ramp index 1 of the 10-glyph classic ramp.
        let frame = solid(16, 24, (128, 128, 128));
        let config = ConvertConfig::default();
        let ramp = GlyphRamp::new(RAMP_CLASSIC);
        let grid = build_grid(&frame, &config, &ramp, None).unwrap();
        assert_eq!((grid.width, grid.height), (2, 2));
        for cell in &grid.cells {
            assert_eq!(cell.ch, '%');
            for c in [cell.fg.0, cell.fg.1, cell.fg.2] {
                assert!((i16::from(c) - 128).abs() <= 1);
            }
        }
    }

    #[test]
    fn black_cells_are_forced_to_the_empty_glyph() {
        let frame = solid(16, 24, (0, 0, 0));
        let config = ConvertConfig::default();
        // A ramp whose darkest glyph is not a space still yields spaces.
        let ramp = GlyphRamp::new("#@");
        let grid = build_grid(&frame, &config, &ramp, None).unwrap();
        assert!(grid.cells.iter().all(|c| c.ch == EMPTY_GLYPH));
    }

    #[test]
    fn image_smaller_than_one_cell_is_an_invalid_grid() {
        let frame = solid(7, 30, (128, 128, 128));
        let config = ConvertConfig::default();
        let ramp = GlyphRamp::new(RAMP_CLASSIC);
        let err = build_grid(&frame, &config, &ramp, None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidGrid { .. }));
    }

    #[test]
    fn majority_masked_cells_become_empty() {
        let frame = solid(16, 12, (250, 250, 250));
        let mut mask = BackgroundMask::new(16, 12);
        // Mask the entire left cell, none of the right cell.
        for y in 0..12 {
            for x in 0..8 {
                mask.set(x, y, true);
            }
        }
        let config = ConvertConfig::default();
        let ramp = GlyphRamp::new(RAMP_CLASSIC);
        let grid = build_grid(&frame, &config, &ramp, Some(&mask)).unwrap();
        assert_eq!(grid.get(0, 0).ch, EMPTY_GLYPH);
        assert_eq!(grid.get(0, 0).fg, (0, 0, 0));
        assert_ne!(grid.get(1, 0).ch, EMPTY_GLYPH);
    }

    #[test]
    fn minority_masked_cells_keep_their_glyph() {
        let frame = solid(8, 12, (250, 250, 250));
        let mut mask = BackgroundMask::new(8, 12);
        for y in 0..5 {
            for x in 0..8 {
                mask.set(x, y, true);
            }
        }
        let config = ConvertConfig::default();
        let ramp = GlyphRamp::new(RAMP_CLASSIC);
        let grid = build_grid(&frame, &config, &ramp, Some(&mask)).unwrap();
        assert_ne!(grid.get(0, 0).ch, EMPTY_GLYPH);
    }

    #[test]
    fn mismatched_mask_is_ignored() {
        let frame = solid(16, 12, (250, 250, 250));
        let mask = BackgroundMask::new(3, 3);
        let config = ConvertConfig::default();
        let ramp = GlyphRamp::new(RAMP_CLASSIC);
        let grid = build_grid(&frame, &config, &ramp, Some(&mask)).unwrap();
        assert!(grid.cells.iter().all(|c| c.ch != EMPTY_GLYPH));
    }

    #[test]
    fn near_white_cells_map_to_the_light_end() {
        let frame = solid(8, 12, (255, 255, 255));
        let config = ConvertConfig::default();
        let ramp = GlyphRamp::new(RAMP_CLASSIC);
        let grid = build_grid(&frame, &config, &ramp, None).unwrap();
        assert_eq!(grid.get(0, 0).ch, ' ');
        assert_eq!(grid.get(0, 0).fg, (255, 255, 255));
    }
}
