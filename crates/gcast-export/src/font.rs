use std::path::Path;

use ab_glyph::FontVec;

/// A rendering face for the rasterizer.
pub enum FontFace {
    /// Outline font loaded from disk (TTF/OTF).
    Outline(FontVec),
    /// Built-in 8×8 bitmap glyphs.
    Builtin,
}

/// Load the preferred monospace font, falling back to the built-in face.
///
/// Loading never fails: an unreadable or invalid font file logs a warning
/// and the built-in bitmap face takes over.
///
/// # Example
/// ```
/// use gcast_export::font::{self, FontFace};
/// assert!(matches!(font::load(None), FontFace::Builtin));
/// ```
#[must_use]
pub fn load(path: Option<&Path>) -> FontFace {
    let Some(path) = path else {
        return FontFace::Builtin;
    };
    match std::fs::read(path) {
        Ok(bytes) => match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                log::debug!("police chargée : {}", path.display());
                FontFace::Outline(font)
            }
            Err(err) => {
                log::warn!(
                    "police {} invalide ({err}), repli sur la police intégrée",
                    path.display()
                );
                FontFace::Builtin
            }
        },
        Err(err) => {
            log::warn!(
                "police {} illisible ({err}), repli sur la police intégrée",
                path.display()
            );
            FontFace::Builtin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_font_falls_back_to_builtin() {
        let face = load(Some(Path::new("/nonexistent/mono.ttf")));
        assert!(matches!(face, FontFace::Builtin));
    }

    #[test]
    fn invalid_font_data_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let face = load(Some(&path));
        assert!(matches!(face, FontFace::Builtin));
    }
}
