use gcast_core::color::{self, LinearLut};
use gcast_core::frame::PixelBuffer;

/// Résultat de la réduction d'une cellule.
#[derive(Clone, Copy, Debug)]
pub struct CellStats {
    /// Representative color, re-encoded to display space.
    pub color: (u8, u8, u8),
    /// Luminance BT.709 de la moyenne linéaire, facteur de luminosité inclus.
    pub luminance: f32,
}

/// Grid dimensions for an image partitioned into cells.
///
/// Trailing pixels beyond the last full cell are dropped, matching
/// integer-division truncation.
///
/// # Example
/// ```
/// use gcast_ascii::reduce::grid_dims;
/// assert_eq!(grid_dims(16, 24, 8, 12), (2, 2));
/// assert_eq!(grid_dims(17, 25, 8, 12), (2, 2));
/// ```
#[must_use]
pub fn grid_dims(width: u32, height: u32, cell_width: u32, cell_height: u32) -> (u32, u32) {
    (width / cell_width.max(1), height / cell_height.max(1))
}

/// Réduit une cellule à une couleur représentative et une luminance.
///
/// Every pixel in the cell's bounding rectangle (clipped to the image) is
/// decoded to linear light, averaged per channel, scaled by the brightness
/// factor, then re-encoded once for the representative color. Luminance is
/// the BT.709 dot product of the scaled linear average, not a plain channel
/// mean.
///
/// # Example
/// ```
/// use gcast_core::color::LinearLut;
/// use gcast_core::frame::PixelBuffer;
/// use gcast_ascii::reduce::reduce_cell;
///
/// let frame = PixelBuffer::new(8, 12); // all black
/// let stats = reduce_cell(&frame, &LinearLut::new(), 0, 0, 8, 12, 1.0);
/// assert_eq!(stats.color, (0, 0, 0));
/// assert_eq!(stats.luminance, 0.0);
/// ```
#[must_use]
pub fn reduce_cell(
    frame: &PixelBuffer,
    lut: &LinearLut,
    x0: u32,
    y0: u32,
    cell_width: u32,
    cell_height: u32,
    brightness: f32,
) -> CellStats {
    let x1 = x0.saturating_add(cell_width).min(frame.width);
    let y1 = y0.saturating_add(cell_height).min(frame.height);

    let mut sum_r = 0.0_f32;
    let mut sum_g = 0.0_f32;
    let mut sum_b = 0.0_f32;
    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            let (r, g, b) = frame.rgb(x, y);
            sum_r += lut.decode(r);
            sum_g += lut.decode(g);
            sum_b += lut.decode(b);
            count += 1;
        }
    }
    if count == 0 {
        return CellStats {
            color: (0, 0, 0),
            luminance: 0.0,
        };
    }

    let n = count as f32;
    let avg_r = sum_r / n * brightness;
    let avg_g = sum_g / n * brightness;
    let avg_b = sum_b / n * brightness;

    CellStats {
        color: (
            color::linear_to_srgb(avg_r),
            color::linear_to_srgb(avg_g),
            color::linear_to_srgb(avg_b),
        ),
        luminance: color::luminance(avg_r, avg_g, avg_b),
    }
}
