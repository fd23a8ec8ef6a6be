use crate::error::CoreError;

/// Buffer de pixels possédé. RGBA row-major, 4 bytes par pixel.
///
/// Read-only input to the conversion pipeline; intermediate working copies
/// are owned by the conversion call and dropped on return.
///
/// # Example
/// ```
/// use gcast_core::frame::PixelBuffer;
/// let fb = PixelBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Crée un buffer pré-alloué (noir, alpha zéro) aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gcast_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(100, 50);
    /// assert_eq!((fb.width, fb.height), (100, 50));
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap a decoded collaborator buffer. 3-channel data is expanded with
    /// opaque alpha; 4-channel data is taken as-is.
    ///
    /// This is the boundary where external pixel buffers enter the
    /// pipeline, so shape mismatches surface here rather than in the core.
    ///
    /// # Errors
    /// [`CoreError::UnsupportedPixelFormat`] for channel counts other than
    /// 3 or 4; [`CoreError::InvalidDimensions`] when a dimension is zero or
    /// the data length disagrees with the dimensions.
    ///
    /// # Example
    /// ```
    /// use gcast_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::from_raw(vec![10, 20, 30], 1, 1, 3).unwrap();
    /// assert_eq!(fb.pixel(0, 0), (10, 20, 30, 255));
    /// assert!(PixelBuffer::from_raw(vec![0], 1, 1, 1).is_err());
    /// ```
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let pixels = width as usize * height as usize;
        match channels {
            4 => {
                if data.len() != pixels * 4 {
                    return Err(CoreError::InvalidDimensions { width, height });
                }
                Ok(Self { data, width, height })
            }
            3 => {
                if data.len() != pixels * 3 {
                    return Err(CoreError::InvalidDimensions { width, height });
                }
                let mut rgba = Vec::with_capacity(pixels * 4);
                for px in data.chunks_exact(3) {
                    rgba.extend_from_slice(px);
                    rgba.push(255);
                }
                Ok(Self {
                    data: rgba,
                    width,
                    height,
                })
            }
            other => Err(CoreError::UnsupportedPixelFormat { channels: other }),
        }
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use gcast_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Canaux RGB du pixel (x, y), alpha ignoré.
    #[inline(always)]
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let (r, g, b, _) = self.pixel(x, y);
        (r, g, b)
    }

    /// Écrit les canaux RGB du pixel (x, y). L'alpha est conservé.
    #[inline(always)]
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 2 < self.data.len() {
            self.data[idx] = rgb.0;
            self.data[idx + 1] = rgb.1;
            self.data[idx + 2] = rgb.2;
        }
    }

    /// Luminance perceptuelle BT.709, entière, en espace d'affichage.
    ///
    /// Feeds the grayscale input of the edge detector; block averaging uses
    /// the linear-light path in `gcast_core::color` instead.
    ///
    /// # Example
    /// ```
    /// use gcast_core::frame::PixelBuffer;
    /// let mut fb = PixelBuffer::new(1, 1);
    /// fb.set_rgb(0, 0, (255, 255, 255));
    /// assert_eq!(fb.luminance8(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance8(&self, x: u32, y: u32) -> u8 {
        let (r, g, b, _) = self.pixel(x, y);
        ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
    }

    /// Flat grayscale copy, row-major, one byte per pixel.
    #[must_use]
    pub fn to_luma(&self) -> Vec<u8> {
        let mut luma = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                luma.push(self.luminance8(x, y));
            }
        }
        luma
    }
}

/// Une cellule de la grille : un glyphe et sa couleur d'affichage.
///
/// # Example
/// ```
/// use gcast_core::frame::GlyphCell;
/// let cell = GlyphCell::default();
/// assert_eq!(cell.ch, ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground (RGB, espace d'affichage).
    pub fg: (u8, u8, u8),
}

impl Default for GlyphCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: (0, 0, 0),
        }
    }
}

/// Grille de glyphes. Construite une fois par conversion, immuable ensuite,
/// consommée par exactement un backend de rendu.
///
/// # Example
/// ```
/// use gcast_core::frame::{GlyphCell, GlyphGrid};
/// let mut grid = GlyphGrid::new(80, 24);
/// grid.set(0, 0, GlyphCell { ch: '@', fg: (255, 0, 0) });
/// assert_eq!(grid.get(0, 0).ch, '@');
/// ```
#[derive(Clone, Debug)]
pub struct GlyphGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<GlyphCell>,
    /// Width in characters.
    pub width: u16,
    /// Height in characters.
    pub height: u16,
}

impl GlyphGrid {
    /// Crée une grille pré-allouée de cellules vides.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![GlyphCell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, cell: GlyphCell) {
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &GlyphCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }
}

/// Masque d'arrière-plan par pixel. `true` = arrière-plan.
///
/// Produced by the built-in classifier or supplied by an external
/// segmentation collaborator; lifetime bounded to a single conversion call.
///
/// # Example
/// ```
/// use gcast_core::frame::BackgroundMask;
/// let mut mask = BackgroundMask::new(4, 4);
/// mask.set(1, 1, true);
/// assert!(mask.get(1, 1));
/// assert!(!mask.get(0, 0));
/// ```
#[derive(Clone)]
pub struct BackgroundMask {
    /// Flat boolean array, row-major.
    pub data: Vec<bool>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl BackgroundMask {
    /// Crée un masque tout-sujet (aucun pixel marqué arrière-plan).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![false; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Derive a mask from the alpha channel of a segmented image.
    ///
    /// Fully transparent pixels are background — the convention used by
    /// external matting/segmentation collaborators that hand back RGBA.
    ///
    /// # Example
    /// ```
    /// use gcast_core::frame::{BackgroundMask, PixelBuffer};
    /// let fb = PixelBuffer::new(2, 2); // alpha all zero
    /// let mask = BackgroundMask::from_alpha(&fb);
    /// assert!(mask.get(0, 0) && mask.get(1, 1));
    /// ```
    #[must_use]
    pub fn from_alpha(frame: &PixelBuffer) -> Self {
        let mut mask = Self::new(frame.width, frame.height);
        for (slot, px) in mask.data.iter_mut().zip(frame.data.chunks_exact(4)) {
            *slot = px[3] == 0;
        }
        mask
    }

    /// Lit le masque en (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height, "mask out of bounds");
        self.data[(y * self.width + x) as usize]
    }

    /// Écrit le masque en (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        debug_assert!(x < self.width && y < self.height, "mask out of bounds");
        self.data[(y * self.width + x) as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_expands_rgb_with_opaque_alpha() {
        let fb = PixelBuffer::from_raw(vec![1, 2, 3, 4, 5, 6], 2, 1, 3).unwrap();
        assert_eq!(fb.pixel(0, 0), (1, 2, 3, 255));
        assert_eq!(fb.pixel(1, 0), (4, 5, 6, 255));
    }

    #[test]
    fn from_raw_rejects_odd_channel_counts() {
        for channels in [0u8, 1, 2, 5] {
            let err = PixelBuffer::from_raw(vec![0; 16], 2, 2, channels).unwrap_err();
            assert!(matches!(
                err,
                crate::error::CoreError::UnsupportedPixelFormat { .. }
            ));
        }
    }

    #[test]
    fn from_raw_rejects_zero_dimensions_and_bad_lengths() {
        assert!(PixelBuffer::from_raw(vec![], 0, 4, 4).is_err());
        assert!(PixelBuffer::from_raw(vec![0; 5], 1, 1, 4).is_err());
    }

    #[test]
    fn set_rgb_preserves_alpha() {
        let mut fb = PixelBuffer::from_raw(vec![0, 0, 0, 77], 1, 1, 4).unwrap();
        fb.set_rgb(0, 0, (9, 8, 7));
        assert_eq!(fb.pixel(0, 0), (9, 8, 7, 77));
    }

    #[test]
    fn luminance8_weighs_green_highest() {
        let mut fb = PixelBuffer::new(3, 1);
        fb.set_rgb(0, 0, (255, 0, 0));
        fb.set_rgb(1, 0, (0, 255, 0));
        fb.set_rgb(2, 0, (0, 0, 255));
        assert!(fb.luminance8(1, 0) > fb.luminance8(0, 0));
        assert!(fb.luminance8(0, 0) > fb.luminance8(2, 0));
    }

    #[test]
    fn alpha_mask_marks_transparent_pixels_only() {
        let data = vec![
            10, 10, 10, 0, // background
            20, 20, 20, 255, // subject
        ];
        let fb = PixelBuffer::from_raw(data, 2, 1, 4).unwrap();
        let mask = BackgroundMask::from_alpha(&fb);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
    }

    #[test]
    fn grid_default_cell_is_the_empty_glyph() {
        let grid = GlyphGrid::new(3, 2);
        assert_eq!(grid.cells.len(), 6);
        assert_eq!(grid.get(2, 1).ch, ' ');
        assert_eq!(grid.get(2, 1).fg, (0, 0, 0));
    }
}
