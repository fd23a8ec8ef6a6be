//! Glyph ramps: ordered character palettes, darkest to lightest.

/// 10 caractères — ramp classique, bon contraste.
pub const RAMP_CLASSIC: &str = "@%#*+=-:. ";

/// 95 caractères — gradation fine, même ordre dense→clair.
pub const RAMP_EXTENDED: &str = "@MWN$B%Qmg&D8GwROH96Kqdpb0USEhP5A4CX3keVZun#2aFoyYsT][xcJL|z7fv{}1t?jl()I+r*!=i<>^\"\\/~_;',-:.` ";

/// The glyph emitted for suppressed background cells.
pub const EMPTY_GLYPH: char = ' ';

/// An ordered, immutable glyph palette.
///
/// Index 0 is the densest glyph and corresponds to luminance 0.0; the last
/// index is the lightest and corresponds to luminance 1.0. The ordering is
/// fixed for the lifetime of a conversion run.
///
/// # Example
/// ```
/// use gcast_core::ramp::GlyphRamp;
/// let ramp = GlyphRamp::new("@ .");
/// assert_eq!(ramp.glyph_for(0.0), '@');
/// assert_eq!(ramp.glyph_for(1.0), '.');
/// ```
#[derive(Clone, Debug)]
pub struct GlyphRamp {
    chars: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from characters ordered darkest→lightest.
    ///
    /// An empty string falls back to [`RAMP_CLASSIC`] so the non-empty
    /// invariant always holds.
    ///
    /// # Example
    /// ```
    /// use gcast_core::ramp::GlyphRamp;
    /// let fallback = GlyphRamp::new("");
    /// assert_eq!(fallback.glyph_for(0.0), '@');
    /// ```
    #[must_use]
    pub fn new(ramp: &str) -> Self {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.is_empty() {
            return Self::new(RAMP_CLASSIC);
        }
        Self { chars }
    }

    /// Map a normalized luminance to a glyph.
    ///
    /// Clamps to [0.0, 1.0]; the index is `floor(lum * (len - 1))`. Pure and
    /// stateless: the same input always yields the same glyph.
    ///
    /// # Example
    /// ```
    /// use gcast_core::ramp::{GlyphRamp, RAMP_CLASSIC};
    /// let ramp = GlyphRamp::new(RAMP_CLASSIC);
    /// assert_eq!(ramp.glyph_for(0.5), '+');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn glyph_for(&self, luminance: f32) -> char {
        let lum = if luminance.is_finite() {
            luminance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let index = (lum * (self.chars.len() - 1) as f32) as usize;
        self.chars[index.min(self.chars.len() - 1)]
    }

    /// Characters of the ramp, darkest first.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}
