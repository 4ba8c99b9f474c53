use std::fmt;
use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::scene::shapes::text::LineExtent;

/// Error returned when no usable font could be loaded.
#[derive(Debug, Clone)]
pub enum FontLoadError {
    /// The bytes were read but fontdue rejected them.
    Parse(String),
    /// None of the candidate files could be read.
    NotFound(Vec<PathBuf>),
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontLoadError::Parse(msg) => write!(f, "font load error: {msg}"),
            FontLoadError::NotFound(paths) => {
                write!(f, "font load error: none of {} candidate file(s) readable", paths.len())?;
                for p in paths {
                    write!(f, "\n  {}", p.display())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font loaded into a [`FontSystem`]: its load index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub usize);

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is owned by the application
/// and passed to `TextRenderer::render` each frame so glyphs can be
/// rasterized on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Loads the first candidate file that exists and parses.
    ///
    /// Unreadable files are skipped silently; a readable file that fails to
    /// parse is logged and skipped as well.
    pub fn load_first<P: AsRef<Path>>(
        &mut self,
        candidates: &[P],
    ) -> Result<FontId, FontLoadError> {
        for path in candidates {
            let path = path.as_ref();
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            match self.load_font(&bytes) {
                Ok(id) => {
                    log::debug!("loaded font {} as {id:?}", path.display());
                    return Ok(id);
                }
                Err(e) => log::warn!("skipping {}: {e}", path.display()),
            }
        }
        Err(FontLoadError::NotFound(
            candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        ))
    }

    /// Returns the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Ascent/descent at `size`, falling back to a 0.8/-0.2 em split when the
    /// font has no horizontal metrics.
    pub fn line_extent(&self, id: FontId, size: f32) -> LineExtent {
        self.get(id)
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| LineExtent {
                ascent: m.ascent,
                descent: m.descent,
            })
            .unwrap_or(LineExtent {
                ascent: size * 0.8,
                descent: -size * 0.2,
            })
    }

    /// Pen advance of a single unwrapped line, in logical pixels.
    ///
    /// Layout runs at `size * scale` and is divided back so the result matches
    /// what the renderer places in physical pixels.
    #[must_use]
    pub fn measure_advance(&self, text: &str, id: FontId, size: f32, scale: f32) -> f32 {
        let Some(font) = self.get(id) else {
            return 0.0;
        };

        let scale = scale.max(0.01);
        let phys_size = size * scale;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, phys_size, 0));

        // Pen position after each glyph rather than the bitmap edge, so
        // trailing side bearings count toward the advance.
        layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, phys_size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max)
            / scale
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut fs = FontSystem::new();
        let err = fs.load_font(b"definitely not a font").unwrap_err();
        assert!(matches!(err, FontLoadError::Parse(_)));
        assert!(fs.get(FontId(0)).is_none());
    }

    #[test]
    fn missing_candidates_report_every_path() {
        let mut fs = FontSystem::new();
        let paths = ["/nonexistent/dial/a.ttf", "/nonexistent/dial/b.ttf"];
        let err = fs.load_first(&paths).unwrap_err();
        match &err {
            FontLoadError::NotFound(list) => assert_eq!(list.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("b.ttf"));
    }

    #[test]
    fn unknown_font_measures_zero_and_uses_fallback_extent() {
        let fs = FontSystem::new();
        assert!(fs.get(FontId(0)).is_none());
        assert_eq!(fs.measure_advance("12", FontId(0), 10.0, 1.0), 0.0);
        let ext = fs.line_extent(FontId(0), 10.0);
        assert_eq!(
            ext,
            LineExtent {
                ascent: 8.0,
                descent: -2.0
            }
        );
    }
}
