//! sRGB transfer function (IEC 61966-2-1) and BT.709 luminance.
//!
//! Averaging gamma-encoded channel values biases block averages toward
//! brightness. Every averaging pass decodes to linear light first and
//! re-encodes once at the end.

/// Coefficients BT.709 pour la luminance en lumière linéaire.
pub const BT709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Décode un canal sRGB 8 bits vers la lumière linéaire [0.0, 1.0].
///
/// # Example
/// ```
/// use gcast_core::color::srgb_to_linear;
/// assert_eq!(srgb_to_linear(0), 0.0);
/// assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn srgb_to_linear(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Ré-encode une valeur linéaire vers un canal sRGB 8 bits.
///
/// Out-of-range or non-finite inputs are clamped, never rejected.
///
/// # Example
/// ```
/// use gcast_core::color::linear_to_srgb;
/// assert_eq!(linear_to_srgb(0.0), 0);
/// assert_eq!(linear_to_srgb(1.0), 255);
/// assert_eq!(linear_to_srgb(2.5), 255);
/// ```
#[must_use]
pub fn linear_to_srgb(l: f32) -> u8 {
    let l = if l.is_finite() { l.max(0.0) } else { 0.0 };
    let c = if l <= 0.003_130_8 {
        12.92 * l
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Luminance BT.709 d'un triplet RGB en lumière linéaire.
///
/// # Example
/// ```
/// use gcast_core::color::luminance;
/// assert!((luminance(1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
/// assert_eq!(luminance(0.0, 0.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    BT709[0] * r + BT709[1] * g + BT709[2] * b
}

/// Lookup table mapping the 256 sRGB channel values to linear light.
///
/// Pre-computed once per conversion for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use gcast_core::color::LinearLut;
/// let lut = LinearLut::new();
/// assert_eq!(lut.decode(0), 0.0);
/// ```
pub struct LinearLut {
    lut: [f32; 256],
}

impl LinearLut {
    /// Construit la table de décodage.
    #[must_use]
    pub fn new() -> Self {
        let mut lut = [0.0_f32; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = srgb_to_linear(i as u8);
        }
        Self { lut }
    }

    /// Decode one channel value.
    #[inline(always)]
    #[must_use]
    pub fn decode(&self, c: u8) -> f32 {
        self.lut[c as usize]
    }
}

impl Default for LinearLut {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_roundtrip_within_one_unit() {
        for v in 0..=255u8 {
            let back = linear_to_srgb(srgb_to_linear(v));
            assert!(
                (i16::from(back) - i16::from(v)).abs() <= 1,
                "roundtrip drift at {v}: {back}"
            );
        }
    }

    #[test]
    fn transfer_function_is_monotonic() {
        let mut prev = -1.0_f32;
        for v in 0..=255u8 {
            let l = srgb_to_linear(v);
            assert!(l > prev, "non monotone à {v}");
            prev = l;
        }
    }

    #[test]
    fn linear_segment_matches_at_threshold() {
        // 0.04045 display ≈ 10.3/255; both branch formulas agree near the knee.
        let below = srgb_to_linear(10);
        let above = srgb_to_linear(11);
        assert!(above > below);
        assert!(above - below < 0.001);
    }

    #[test]
    fn encode_clamps_out_of_range() {
        assert_eq!(linear_to_srgb(-0.5), 0);
        assert_eq!(linear_to_srgb(42.0), 255);
        assert_eq!(linear_to_srgb(f32::NAN), 0);
    }

    #[test]
    fn luminance_weights_sum_to_one() {
        let sum: f32 = BT709.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn lut_matches_direct_conversion() {
        let lut = LinearLut::new();
        for v in (0..=255u8).step_by(7) {
            assert_eq!(lut.decode(v), srgb_to_linear(v));
        }
    }
}
