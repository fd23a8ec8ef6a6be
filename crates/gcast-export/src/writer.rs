use std::path::Path;

use anyhow::{Context, Result};
use gcast_core::frame::PixelBuffer;

/// Hand a rendered canvas to the image encoder.
///
/// The output format follows the file extension. The canvas alpha is
/// always opaque, so encoding drops to RGB — this keeps JPEG and BMP
/// targets working alongside PNG.
///
/// # Errors
/// Returns an error if the canvas shape is inconsistent or encoding fails.
pub fn write_image(canvas: &PixelBuffer, path: &Path) -> Result<()> {
    let mut rgb = Vec::with_capacity(canvas.width as usize * canvas.height as usize * 3);
    for px in canvas.data.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    let encoded = image::RgbImage::from_raw(canvas.width, canvas.height, rgb)
        .context("canvas dimensions disagree with its buffer")?;
    encoded
        .save(path)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_readable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut canvas = PixelBuffer::new(6, 4);
        canvas.set_rgb(2, 1, (200, 100, 50));
        write_image(&canvas, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (6, 4));
        assert_eq!(back.get_pixel(2, 1).0, [200, 100, 50]);
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let canvas = PixelBuffer::new(2, 2);
        assert!(write_image(&canvas, Path::new("/nonexistent/dir/out.png")).is_err());
    }
}
