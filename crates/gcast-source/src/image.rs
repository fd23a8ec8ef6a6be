use std::path::Path;

use anyhow::{Context, Result, bail};
use gcast_core::frame::{BackgroundMask, PixelBuffer};

/// Load an image from disk into a pixel buffer.
///
/// An alpha channel is preserved when the decoded image carries one (an
/// externally segmented RGBA input keeps its transparency for
/// `--alpha-mask`); plain RGB goes through the 3-channel boundary and gets
/// opaque alpha.
///
/// # Errors
/// Returns an error if the file cannot be decoded or the buffer fails the
/// core's shape checks.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let (width, height) = (img.width(), img.height());
    let buffer = if img.color().has_alpha() {
        PixelBuffer::from_raw(img.to_rgba8().into_raw(), width, height, 4)
    } else {
        PixelBuffer::from_raw(img.to_rgb8().into_raw(), width, height, 3)
    };
    buffer.with_context(|| format!("pixels invalides dans {}", path.display()))
}

/// Load an externally produced background mask.
///
/// Grayscale convention: non-zero = background (the usual output of
/// segmentation tooling). The mask must match the processed image's
/// dimensions; a mismatch is rejected at this boundary.
///
/// # Errors
/// Returns an error on decode failure or dimension mismatch.
pub fn load_mask(path: &Path, width: u32, height: u32) -> Result<BackgroundMask> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger le masque {}", path.display()))?;
    if img.width() != width || img.height() != height {
        bail!(
            "masque {}×{} mais image {}×{}",
            img.width(),
            img.height(),
            width,
            height
        );
    }
    let luma = img.to_luma8();
    let mut mask = BackgroundMask::new(width, height);
    for (slot, value) in mask.data.iter_mut().zip(luma.into_raw()) {
        *slot = value > 0;
    }
    Ok(mask)
}
