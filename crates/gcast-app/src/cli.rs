use std::path::PathBuf;

use clap::Parser;

/// glyphcast — convertisseur d'images en glyph-art colorisé.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub input: PathBuf,

    /// Image de sortie. Sans elle, le rendu va au terminal en ANSI truecolor.
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml si présent.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Largeur d'une cellule en pixels source.
    #[arg(long)]
    pub cell_width: Option<u32>,

    /// Hauteur d'une cellule en pixels source.
    #[arg(long)]
    pub cell_height: Option<u32>,

    /// Facteur de luminosité appliqué à la moyenne linéaire de chaque cellule.
    #[arg(long)]
    pub brightness: Option<f32>,

    /// Glyph ramp: "classic", "extended", or a literal darkest→lightest string.
    #[arg(long)]
    pub ramp: Option<String>,

    /// Isoler le sujet : fond noirci, contours amplifiés.
    #[arg(long, default_value_t = false)]
    pub minimalistic: bool,

    /// Externally produced background mask (grayscale; non-zero = background).
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Derive the background mask from the input's alpha channel
    /// (transparent = background), e.g. after external segmentation.
    #[arg(long, default_value_t = false)]
    pub alpha_mask: bool,

    /// Distance RGB euclidienne sous laquelle un pixel est du fond.
    #[arg(long)]
    pub bg_threshold: Option<f32>,

    /// Multiplicateur des canaux pour les pixels de contour.
    #[arg(long)]
    pub edge_amplify: Option<f32>,

    /// Police monospace pour la sortie raster (TTF/OTF).
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Downscale inputs whose width or height exceeds this bound.
    #[arg(long)]
    pub max_dim: Option<u32>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation_parses() {
        let cli = Cli::try_parse_from(["glyphcast", "photo.png"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("photo.png"));
        assert!(cli.output.is_none());
        assert!(!cli.minimalistic);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn flags_parse_into_overrides() {
        let cli = Cli::try_parse_from([
            "glyphcast",
            "in.png",
            "out.png",
            "--cell-width",
            "4",
            "--brightness",
            "0.9",
            "--minimalistic",
            "--ramp",
            "extended",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert_eq!(cli.cell_width, Some(4));
        assert_eq!(cli.brightness, Some(0.9));
        assert!(cli.minimalistic);
        assert_eq!(cli.ramp.as_deref(), Some("extended"));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["glyphcast"]).is_err());
    }
}
