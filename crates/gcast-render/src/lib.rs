/// Terminal backend for glyphcast.
///
/// Streams a glyph grid as ANSI-24-bit-colored text, line by line, with no
/// canvas allocation.

pub mod term;

pub use term::write_grid;
