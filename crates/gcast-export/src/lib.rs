/// Raster backend for glyphcast.
///
/// Pre-rasterizes a glyph alpha atlas (outline font or built-in bitmap
/// face), composes glyph grids onto an RGBA canvas, and hands finished
/// canvases to the image encoder.

pub mod font;
pub mod rasterizer;
pub mod writer;

pub use font::FontFace;
pub use rasterizer::Rasterizer;
