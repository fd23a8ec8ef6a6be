/// Conversion engine for glyphcast.
///
/// Reduces pixel blocks to representative colors and luminances in linear
/// light, classifies background and edges in minimalistic mode, and
/// assembles the glyph grid consumed by the render backends.

pub mod convert;
pub mod minimal;
pub mod reduce;

pub use convert::build_grid;
pub use minimal::isolate_subject;
