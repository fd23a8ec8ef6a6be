use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use gcast_core::frame::PixelBuffer;

/// Downscale a frame so that neither axis exceeds `max_dim`, preserving the
/// aspect ratio. Frames already inside the bound pass through untouched.
///
/// The classifier and the rasterizer allocate buffers proportional to pixel
/// count, so inputs are bounded here, before the conversion starts.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use gcast_core::frame::PixelBuffer;
/// use gcast_source::resize::bound_dimensions;
///
/// let frame = PixelBuffer::new(100, 50);
/// let bounded = bound_dimensions(frame, 10).unwrap();
/// assert_eq!((bounded.width, bounded.height), (10, 5));
/// ```
pub fn bound_dimensions(frame: PixelBuffer, max_dim: u32) -> Result<PixelBuffer> {
    let max_dim = max_dim.max(1);
    if frame.width <= max_dim && frame.height <= max_dim {
        return Ok(frame);
    }

    let scale = f64::from(max_dim) / f64::from(frame.width.max(frame.height));
    let width = ((f64::from(frame.width) * scale) as u32).max(1);
    let height = ((f64::from(frame.height) * scale) as u32).max(1);
    log::info!(
        "image {}×{} au-delà de la limite {max_dim}, réduite à {width}×{height}",
        frame.width,
        frame.height
    );

    let mut src = frame;
    let src_image = Image::from_slice_u8(src.width, src.height, &mut src.data, PixelType::U8x4)
        .context("Invalid source dimensions")?;

    let mut dst = PixelBuffer::new(width, height);
    let mut dst_image = Image::from_slice_u8(width, height, &mut dst.data, PixelType::U8x4)
        .context("Invalid destination dimensions")?;

    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, Some(&ResizeOptions::new()))
        .context("Resize failed")?;

    Ok(dst)
}
