use std::path::Path;

use anyhow::Result;
use gcast_core::config::ConvertConfig;
use gcast_core::frame::BackgroundMask;
use gcast_core::ramp::{self, GlyphRamp};

use crate::cli::Cli;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Résout la configuration : fichier TOML puis overrides CLI.
///
/// # Errors
/// Retourne une erreur si un fichier de configuration explicite est
/// illisible ou invalide.
pub fn resolve_config(cli: &Cli) -> Result<ConvertConfig> {
    let mut config = if let Some(path) = &cli.config {
        ConvertConfig::load(path)?
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        ConvertConfig::load(Path::new(DEFAULT_CONFIG_PATH))?
    } else {
        ConvertConfig::default()
    };

    if let Some(v) = cli.cell_width {
        config.cell_width = v;
    }
    if let Some(v) = cli.cell_height {
        config.cell_height = v;
    }
    if let Some(v) = cli.brightness {
        config.brightness = v;
    }
    if let Some(arg) = &cli.ramp {
        config.ramp = resolve_ramp(arg);
    }
    if cli.minimalistic {
        config.minimalistic = true;
    }
    if let Some(v) = cli.bg_threshold {
        config.bg_threshold = v;
    }
    if let Some(v) = cli.edge_amplify {
        config.edge_amplify = v;
    }
    if let Some(v) = cli.max_dim {
        config.max_dimension = v;
    }
    if let Some(font) = &cli.font {
        config.font = Some(font.clone());
    }
    Ok(config)
}

/// Preset names map to the built-in ramps; anything else is a literal ramp.
fn resolve_ramp(arg: &str) -> String {
    match arg {
        "classic" => ramp::RAMP_CLASSIC.to_string(),
        "extended" => ramp::RAMP_EXTENDED.to_string(),
        custom => custom.to_string(),
    }
}

/// Exécute la conversion de bout en bout.
///
/// Mask precedence: an external mask file, else the input's alpha channel
/// (`--alpha-mask`), else the built-in classifier (`minimalistic`), else
/// none. External masks get the same background blackout as the
/// classifier, so the grid's empty-glyph contract holds on both paths.
///
/// # Errors
/// Propagates configuration, I/O, and conversion errors.
pub fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    config.validate()?;
    let ramp = GlyphRamp::new(&config.ramp);

    let frame = gcast_source::load_image(&cli.input)?;
    let mut frame = gcast_source::bound_dimensions(frame, config.max_dimension)?;

    let mask: Option<BackgroundMask> = if let Some(mask_path) = &cli.mask {
        let mask = gcast_source::load_mask(mask_path, frame.width, frame.height)?;
        gcast_ascii::minimal::suppress_background(&mut frame, &mask);
        Some(mask)
    } else if cli.alpha_mask {
        let mask = BackgroundMask::from_alpha(&frame);
        gcast_ascii::minimal::suppress_background(&mut frame, &mask);
        Some(mask)
    } else if config.minimalistic {
        let (processed, mask) = gcast_ascii::isolate_subject(&frame, &config);
        frame = processed;
        Some(mask)
    } else {
        None
    };

    let grid = gcast_ascii::build_grid(&frame, &config, &ramp, mask.as_ref())?;
    log::info!("grille {}×{} construite", grid.width, grid.height);

    match &cli.output {
        Some(path) => {
            let face = gcast_export::font::load(config.font.as_deref());
            let rasterizer = gcast_export::Rasterizer::new(
                &face,
                config.cell_width,
                config.cell_height,
                &config.ramp,
            );
            let canvas = rasterizer.render(&grid)?;
            gcast_export::writer::write_image(&canvas, path)?;
            log::info!(
                "canvas {}×{} écrit dans {}",
                canvas.width,
                canvas.height,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            gcast_render::write_grid(&mut lock, &grid)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli_for(input: PathBuf, output: Option<PathBuf>) -> Cli {
        Cli {
            input,
            output,
            config: None,
            cell_width: None,
            cell_height: None,
            brightness: None,
            ramp: None,
            minimalistic: false,
            mask: None,
            alpha_mask: false,
            bg_threshold: None,
            edge_amplify: None,
            font: None,
            max_dim: None,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn cli_overrides_win_over_defaults() {
        let mut cli = cli_for(PathBuf::from("in.png"), None);
        cli.cell_width = Some(4);
        cli.brightness = Some(0.5);
        cli.ramp = Some("extended".to_string());
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.cell_width, 4);
        assert!((config.brightness - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.ramp, ramp::RAMP_EXTENDED);
        assert_eq!(config.cell_height, 12);
    }

    #[test]
    fn literal_ramp_strings_pass_through() {
        assert_eq!(resolve_ramp("classic"), ramp::RAMP_CLASSIC);
        assert_eq!(resolve_ramp("@#. "), "@#. ");
    }

    #[test]
    fn gray_image_renders_to_a_matching_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        image::RgbImage::from_pixel(16, 24, image::Rgb([128, 128, 128]))
            .save(&input)
            .unwrap();
        let output = dir.path().join("out.png");

        run(&cli_for(input, Some(output.clone()))).unwrap();

        // 2×2 grid at the default 8×12 cells re-rasterizes to 16×24.
        let rendered = image::open(&output).unwrap();
        assert_eq!((rendered.width(), rendered.height()), (16, 24));
    }

    #[test]
    fn minimalistic_run_suppresses_a_flat_background() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flat.png");
        image::RgbImage::from_pixel(32, 24, image::Rgb([210, 210, 210]))
            .save(&input)
            .unwrap();
        let output = dir.path().join("out.png");

        let mut cli = cli_for(input, Some(output.clone()));
        cli.minimalistic = true;
        run(&cli).unwrap();

        let rendered = image::open(&output).unwrap().to_rgb8();
        assert!(rendered.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn external_mask_blanks_masked_cells() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        image::RgbImage::from_pixel(16, 12, image::Rgb([250, 250, 250]))
            .save(&input)
            .unwrap();
        // Mask the left half of the image.
        let mask_path = dir.path().join("mask.png");
        let mut mask_img = image::GrayImage::from_pixel(16, 12, image::Luma([0]));
        for y in 0..12 {
            for x in 0..8 {
                mask_img.put_pixel(x, y, image::Luma([255]));
            }
        }
        mask_img.save(&mask_path).unwrap();
        let output = dir.path().join("out.png");

        let mut cli = cli_for(input, Some(output.clone()));
        cli.mask = Some(mask_path);
        run(&cli).unwrap();

        let rendered = image::open(&output).unwrap().to_rgb8();
        // Left cell is blank; the right cell drew a glyph.
        let left_lit = rendered
            .enumerate_pixels()
            .filter(|(x, _, p)| *x < 8 && p.0 != [0, 0, 0])
            .count();
        let right_lit = rendered
            .enumerate_pixels()
            .filter(|(x, _, p)| *x >= 8 && p.0 != [0, 0, 0])
            .count();
        assert_eq!(left_lit, 0);
        assert!(right_lit > 0);
    }

    #[test]
    fn too_small_input_surfaces_invalid_grid() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tiny.png");
        image::RgbImage::from_pixel(4, 4, image::Rgb([128, 128, 128]))
            .save(&input)
            .unwrap();
        let err = run(&cli_for(input, None)).unwrap_err();
        assert!(err.to_string().contains("empty grid"));
    }
}
