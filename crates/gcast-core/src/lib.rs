/// Shared types, color math, and configuration for glyphcast.
///
/// This crate contains the data model (pixel buffers, glyph grids, masks),
/// the sRGB/linear color conversions, glyph ramps, and the conversion
/// configuration used across the glyphcast workspace.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod ramp;

pub use config::ConvertConfig;
pub use error::CoreError;
pub use frame::{BackgroundMask, GlyphCell, GlyphGrid, PixelBuffer};
pub use ramp::GlyphRamp;

/// Re-exports pour accès par chemin sémantique.
pub mod grid {
    pub use crate::frame::{GlyphCell, GlyphGrid};
}
