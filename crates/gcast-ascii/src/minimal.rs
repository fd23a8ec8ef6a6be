//! Minimalistic mode: subject isolation and edge emphasis.
//!
//! Estimates the background color from the image border, detects edges, and
//! classifies every pixel. Background pixels are blacked out (the reducer's
//! pure-black contract then suppresses their cells); edge pixels are
//! amplified. The background test runs first: a pixel inside the background
//! color threshold is background even when the edge detector marks it.

use gcast_core::config::ConvertConfig;
use gcast_core::frame::{BackgroundMask, PixelBuffer};
use image::GrayImage;
use rayon::prelude::*;

/// Estimate the background color as the per-channel median of all border
/// pixels (full top and bottom rows plus full left and right columns).
///
/// # Example
/// ```
/// use gcast_core::frame::PixelBuffer;
/// use gcast_ascii::minimal::estimate_background;
///
/// let mut frame = PixelBuffer::new(4, 4);
/// for y in 0..4 {
///     for x in 0..4 {
///         frame.set_rgb(x, y, (200, 200, 200));
///     }
/// }
/// frame.set_rgb(1, 1, (0, 0, 0)); // interior pixel, not sampled
/// assert_eq!(estimate_background(&frame), (200, 200, 200));
/// ```
#[must_use]
pub fn estimate_background(frame: &PixelBuffer) -> (u8, u8, u8) {
    let count = (2 * frame.width + 2 * frame.height) as usize;
    let mut r = Vec::with_capacity(count);
    let mut g = Vec::with_capacity(count);
    let mut b = Vec::with_capacity(count);
    let push = |(cr, cg, cb): (u8, u8, u8), r: &mut Vec<u8>, g: &mut Vec<u8>, b: &mut Vec<u8>| {
        r.push(cr);
        g.push(cg);
        b.push(cb);
    };
    for x in 0..frame.width {
        push(frame.rgb(x, 0), &mut r, &mut g, &mut b);
        push(frame.rgb(x, frame.height - 1), &mut r, &mut g, &mut b);
    }
    for y in 0..frame.height {
        push(frame.rgb(0, y), &mut r, &mut g, &mut b);
        push(frame.rgb(frame.width - 1, y), &mut r, &mut g, &mut b);
    }
    (median(&mut r), median(&mut g), median(&mut b))
}

/// Median of one channel. Even sample counts average the two middle values
/// and truncate, matching the reference segmentation tooling.
fn median(values: &mut [u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        ((u16::from(values[mid - 1]) + u16::from(values[mid])) / 2) as u8
    }
}

/// Binary edge map via the multi-stage detector (grayscale conversion,
/// smoothing, gradient, non-maximum suppression, dual-threshold
/// hysteresis), flat row-major.
#[must_use]
pub fn edge_map(frame: &PixelBuffer, low: f32, high: f32) -> Vec<bool> {
    let pixels = frame.width as usize * frame.height as usize;
    let Some(gray) = GrayImage::from_raw(frame.width, frame.height, frame.to_luma()) else {
        return vec![false; pixels];
    };
    let edges = imageproc::edges::canny(&gray, low, high);
    edges.into_raw().into_iter().map(|v| v > 0).collect()
}

/// Classify every pixel against the background estimate and an edge map.
///
/// Per pixel: Euclidean RGB distance to the background below the threshold
/// marks the pixel background (mask true, pixel blacked in the working
/// copy); otherwise an edge pixel has its channels scaled by the
/// amplification factor and clamped; otherwise the pixel passes through.
/// The input frame is never mutated. Rows are processed in parallel; each
/// worker owns disjoint row slices of the copy and the mask.
///
/// An edge map shorter than the image reads as "no edge" past its end.
#[must_use]
pub fn classify(
    frame: &PixelBuffer,
    edges: &[bool],
    background: (u8, u8, u8),
    config: &ConvertConfig,
) -> (PixelBuffer, BackgroundMask) {
    let mut out = frame.clone();
    let mut mask = BackgroundMask::new(frame.width, frame.height);
    let width = frame.width as usize;
    let stride = width * 4;
    let threshold_sq = config.bg_threshold * config.bg_threshold;
    let amplify = config.edge_amplify;

    out.data
        .par_chunks_exact_mut(stride)
        .zip(mask.data.par_chunks_exact_mut(width))
        .enumerate()
        .for_each(|(y, (row, mask_row))| {
            for x in 0..width {
                let idx = x * 4;
                let (r, g, b) = (row[idx], row[idx + 1], row[idx + 2]);
                let dr = f32::from(r) - f32::from(background.0);
                let dg = f32::from(g) - f32::from(background.1);
                let db = f32::from(b) - f32::from(background.2);
                if dr * dr + dg * dg + db * db < threshold_sq {
                    mask_row[x] = true;
                    row[idx] = 0;
                    row[idx + 1] = 0;
                    row[idx + 2] = 0;
                } else if edges.get(y * width + x).copied().unwrap_or(false) {
                    row[idx] = amplified(r, amplify);
                    row[idx + 1] = amplified(g, amplify);
                    row[idx + 2] = amplified(b, amplify);
                }
            }
        });

    (out, mask)
}

#[inline]
fn amplified(c: u8, factor: f32) -> u8 {
    (f32::from(c) * factor).clamp(0.0, 255.0) as u8
}

/// Minimalistic-mode entry point.
///
/// Total over any non-degenerate image; a completely uniform image yields
/// an all-background mask and no amplified pixels.
///
/// # Example
/// ```
/// use gcast_core::config::ConvertConfig;
/// use gcast_core::frame::PixelBuffer;
/// use gcast_ascii::minimal::isolate_subject;
///
/// let frame = PixelBuffer::new(16, 16); // uniform black
/// let (processed, mask) = isolate_subject(&frame, &ConvertConfig::default());
/// assert!(mask.data.iter().all(|&m| m));
/// assert!(processed.data.chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));
/// ```
#[must_use]
pub fn isolate_subject(frame: &PixelBuffer, config: &ConvertConfig) -> (PixelBuffer, BackgroundMask) {
    let background = estimate_background(frame);
    log::debug!(
        "fond estimé : ({}, {}, {})",
        background.0,
        background.1,
        background.2
    );
    let edges = edge_map(frame, config.canny_low, config.canny_high);
    classify(frame, &edges, background, config)
}

/// Black out masked pixels so background cells satisfy the reducer's
/// pure-black contract. Used when an externally produced mask stands in
/// for the built-in classifier.
pub fn suppress_background(frame: &mut PixelBuffer, mask: &BackgroundMask) {
    if mask.width != frame.width || mask.height != frame.height {
        log::warn!(
            "mask {}×{} does not match image {}×{}, leaving pixels untouched",
            mask.width,
            mask.height,
            frame.width,
            frame.height
        );
        return;
    }
    for (px, &masked) in frame.data.chunks_exact_mut(4).zip(mask.data.iter()) {
        if masked {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
        }
    }
}
