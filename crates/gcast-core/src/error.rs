use thiserror::Error;

/// Errors originating from the conversion core.
///
/// All variants are deterministic and input-derivable; the core performs no
/// I/O, so nothing here is transient or retryable. Numeric edge cases are
/// clamped instead of raised — only structural mismatches become errors.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Input buffer has a channel count the pipeline cannot consume.
    #[error("format de pixel non supporté : {channels} canal/canaux")]
    UnsupportedPixelFormat {
        /// Observed channel count.
        channels: u8,
    },

    /// The configured cell size yields zero grid rows or columns.
    #[error(
        "cell size {cell_width}×{cell_height} yields an empty grid for a {width}×{height} image"
    )]
    InvalidGrid {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Configured cell width.
        cell_width: u32,
        /// Configured cell height.
        cell_height: u32,
    },

    /// A glyph grid with no cells cannot be rasterized.
    #[error("glyph grid has no cells")]
    EmptyGrid,
}
