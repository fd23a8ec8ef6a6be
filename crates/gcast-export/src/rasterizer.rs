use std::collections::HashMap;

use ab_glyph::{Font, PxScale, point};
use font8x8::UnicodeFonts;
use gcast_core::CoreError;
use gcast_core::frame::{GlyphGrid, PixelBuffer};
use rayon::prelude::*;

use crate::font::FontFace;

/// Convertit une grille de glyphes en pixels RGBA.
///
/// Maintient un atlas alpha pré-calculé pour que la boucle de rendu ne
/// touche jamais la police.
pub struct Rasterizer {
    cell_width: u32,
    cell_height: u32,
    /// Char → alpha buffer (cell_width × cell_height).
    atlas: HashMap<char, Vec<u8>>,
    /// Shared blank used for characters the face does not cover.
    blank: Vec<u8>,
}

impl Rasterizer {
    /// Pré-calcule l'atlas pour l'ASCII imprimable plus les caractères de
    /// la ramp. Characters the face lacks stay blank cells rather than
    /// replacement boxes, so a sparse font degrades to darkness, not noise.
    #[must_use]
    pub fn new(face: &FontFace, cell_width: u32, cell_height: u32, ramp: &str) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        let mut rasterizer = Self {
            cell_width,
            cell_height,
            atlas: HashMap::new(),
            blank: vec![0u8; (cell_width * cell_height) as usize],
        };

        let printable = (32u8..=126).map(char::from);
        for ch in printable.chain(ramp.chars()) {
            if rasterizer.atlas.contains_key(&ch) {
                continue;
            }
            let alpha = match face {
                FontFace::Outline(font) => rasterizer.outline_alpha(font, ch),
                FontFace::Builtin => rasterizer.bitmap_alpha(ch),
            };
            if let Some(alpha) = alpha {
                rasterizer.atlas.insert(ch, alpha);
            }
        }
        rasterizer
    }

    /// Rasterize one outline glyph into a cell-sized alpha buffer, scaled
    /// to the cell height and clipped to the cell.
    fn outline_alpha(&self, font: &ab_glyph::FontVec, ch: char) -> Option<Vec<u8>> {
        let gid = font.glyph_id(ch);
        // glyph_id 0 = .notdef
        if gid.0 == 0 && ch != '\0' {
            return None;
        }

        let scale = PxScale::from(self.cell_height as f32);
        let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
        let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

        let mut buffer = vec![0u8; (self.cell_width * self.cell_height) as usize];
        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                if px < self.cell_width && py < self.cell_height {
                    let idx = (py * self.cell_width + px) as usize;
                    if idx < buffer.len() {
                        buffer[idx] = (v * 255.0).round() as u8;
                    }
                }
            });
        }
        Some(buffer)
    }

    /// Scale one built-in 8×8 bitmap glyph to the cell, nearest-neighbor.
    fn bitmap_alpha(&self, ch: char) -> Option<Vec<u8>> {
        let rows = font8x8::BASIC_FONTS.get(ch)?;
        let mut buffer = vec![0u8; (self.cell_width * self.cell_height) as usize];
        for cy in 0..self.cell_height {
            let bits = rows[(cy * 8 / self.cell_height).min(7) as usize];
            for cx in 0..self.cell_width {
                let sx = (cx * 8 / self.cell_width).min(7);
                if (bits >> sx) & 1 == 1 {
                    buffer[(cy * self.cell_width + cx) as usize] = 255;
                }
            }
        }
        Some(buffer)
    }

    /// Dimensions du canvas pour une grille donnée.
    #[must_use]
    pub fn canvas_dimensions(&self, grid_w: u16, grid_h: u16) -> (u32, u32) {
        (
            u32::from(grid_w) * self.cell_width,
            u32::from(grid_h) * self.cell_height,
        )
    }

    /// Rendu de la grille sur un canvas noir fraîchement alloué.
    ///
    /// Chaque bande de cellules écrit une tranche disjointe du canvas
    /// (écritures indexées par position), les bandes en parallèle. On
    /// error nothing is allocated, let alone partially written.
    ///
    /// # Errors
    /// [`CoreError::EmptyGrid`] si la grille n'a aucune cellule.
    ///
    /// # Example
    /// ```
    /// use gcast_core::frame::GlyphGrid;
    /// use gcast_export::font::FontFace;
    /// use gcast_export::rasterizer::Rasterizer;
    ///
    /// let r = Rasterizer::new(&FontFace::Builtin, 8, 12, "@ ");
    /// let canvas = r.render(&GlyphGrid::new(3, 2)).unwrap();
    /// assert_eq!((canvas.width, canvas.height), (24, 24));
    /// ```
    pub fn render(&self, grid: &GlyphGrid) -> Result<PixelBuffer, CoreError> {
        if grid.width == 0 || grid.height == 0 {
            return Err(CoreError::EmptyGrid);
        }

        let (width, height) = self.canvas_dimensions(grid.width, grid.height);
        let mut canvas = PixelBuffer::new(width, height);
        let stride = (width * 4) as usize;
        let band_size = stride * self.cell_height as usize;

        canvas
            .data
            .par_chunks_exact_mut(band_size)
            .enumerate()
            .for_each(|(gy, band)| {
                for gx in 0..(grid.width as usize) {
                    let cell = grid.get(gx as u16, gy as u16);
                    let alpha = self.atlas.get(&cell.ch).unwrap_or(&self.blank);
                    let x_start = gx * self.cell_width as usize;

                    for cy in 0..(self.cell_height as usize) {
                        let row = cy * stride;
                        for cx in 0..(self.cell_width as usize) {
                            let a = f32::from(alpha[cy * self.cell_width as usize + cx]) / 255.0;
                            let idx = row + (x_start + cx) * 4;
                            band[idx] = (f32::from(cell.fg.0) * a) as u8;
                            band[idx + 1] = (f32::from(cell.fg.1) * a) as u8;
                            band[idx + 2] = (f32::from(cell.fg.2) * a) as u8;
                            band[idx + 3] = 255;
                        }
                    }
                }
            });

        Ok(canvas)
    }
}
