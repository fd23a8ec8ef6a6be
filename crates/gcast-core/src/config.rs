use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ramp;

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine, si bien
/// qu'un fichier partiel (ou absent) reste valide. The CLI applies per-flag
/// overrides on top of the loaded file.
///
/// # Example
/// ```
/// use gcast_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.cell_width, 8);
/// assert_eq!(config.cell_height, 12);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Largeur d'une cellule en pixels source.
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    /// Hauteur d'une cellule en pixels source.
    #[serde(default = "default_cell_height")]
    pub cell_height: u32,
    /// Multiplicateur appliqué à la moyenne linéaire de chaque cellule.
    /// 1.0 = neutre; pratique (0, 2].
    #[serde(default = "default_brightness")]
    pub brightness: f32,
    /// Glyph ramp, darkest→lightest. Presets: classic (10), extended (95).
    #[serde(default = "default_ramp")]
    pub ramp: String,
    /// Isoler le sujet : fond noirci, contours amplifiés.
    #[serde(default)]
    pub minimalistic: bool,
    /// Euclidean RGB distance below which a pixel counts as background.
    #[serde(default = "default_bg_threshold")]
    pub bg_threshold: f32,
    /// Channel multiplier applied to edge pixels in minimalistic mode.
    #[serde(default = "default_edge_amplify")]
    pub edge_amplify: f32,
    /// Seuil bas de l'hystérésis de détection de contours.
    #[serde(default = "default_canny_low")]
    pub canny_low: f32,
    /// Seuil haut de l'hystérésis de détection de contours.
    #[serde(default = "default_canny_high")]
    pub canny_high: f32,
    /// Inputs larger than this on either axis are downscaled first.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// Monospace font for raster output. None = built-in 8×8 bitmap face.
    #[serde(default)]
    pub font: Option<PathBuf>,
}

fn default_cell_width() -> u32 {
    8
}
fn default_cell_height() -> u32 {
    12
}
fn default_brightness() -> f32 {
    1.0
}
fn default_ramp() -> String {
    ramp::RAMP_CLASSIC.to_string()
}
fn default_bg_threshold() -> f32 {
    50.0
}
fn default_edge_amplify() -> f32 {
    2.0
}
fn default_canny_low() -> f32 {
    50.0
}
fn default_canny_high() -> f32 {
    150.0
}
fn default_max_dimension() -> u32 {
    4096
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            brightness: default_brightness(),
            ramp: default_ramp(),
            minimalistic: false,
            bg_threshold: default_bg_threshold(),
            edge_amplify: default_edge_amplify(),
            canny_low: default_canny_low(),
            canny_high: default_canny_high(),
            max_dimension: default_max_dimension(),
            font: None,
        }
    }
}

impl ConvertConfig {
    /// Charge une configuration TOML.
    ///
    /// # Errors
    /// Retourne une erreur si le fichier est illisible ou le TOML invalide.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("TOML invalide dans {}", path.display()))
    }

    /// Structural validation ahead of a conversion run.
    ///
    /// # Errors
    /// [`CoreError::Config`] for zero cell dimensions, a non-positive
    /// brightness factor, or inverted edge-detector thresholds.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(CoreError::Config(format!(
                "cell size must be at least 1×1, got {}×{}",
                self.cell_width, self.cell_height
            )));
        }
        if self.brightness.is_nan() || self.brightness <= 0.0 {
            return Err(CoreError::Config(format!(
                "brightness factor must be positive, got {}",
                self.brightness
            )));
        }
        if self.canny_low >= self.canny_high {
            return Err(CoreError::Config(format!(
                "edge thresholds must satisfy low < high, got {} ≥ {}",
                self.canny_low, self.canny_high
            )));
        }
        Ok(())
    }
}
