//! Clock configuration.
//!
//! Plain structs with `Default` and builder-style setters; nothing is read
//! from disk. The only environment input is [`FONT_ENV`].

use std::ffi::OsString;
use std::path::PathBuf;

use dial_engine::paint::Color;
use dial_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

use crate::canvas::DEFAULT_FILL;
use crate::fonts::FontRole;

/// When set, names one font file used for every role.
pub const FONT_ENV: &str = "DIAL_FONT";

const FONT_DIRS: [&str; 3] = [
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
];

const NOTO_DIRS: [&str; 2] = ["/usr/share/fonts/noto", "/usr/share/fonts/truetype/noto"];

fn candidates(dejavu_file: &str, noto_file: &str) -> Vec<PathBuf> {
    FONT_DIRS
        .iter()
        .map(|dir| PathBuf::from(dir).join(dejavu_file))
        .chain(NOTO_DIRS.iter().map(|dir| PathBuf::from(dir).join(noto_file)))
        .collect()
}

/// Candidate font files per role, tried in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSources {
    pub light: Vec<PathBuf>,
    pub regular: Vec<PathBuf>,
    pub black: Vec<PathBuf>,
}

impl Default for FontSources {
    fn default() -> Self {
        Self {
            light: candidates("DejaVuSans-ExtraLight.ttf", "NotoSans-Light.ttf"),
            regular: candidates("DejaVuSans.ttf", "NotoSans-Regular.ttf"),
            black: candidates("DejaVuSans-Bold.ttf", "NotoSans-Black.ttf"),
        }
    }
}

impl FontSources {
    /// Uses `path` for every role.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            light: vec![path.clone()],
            regular: vec![path.clone()],
            black: vec![path],
        }
    }

    /// Applies a [`FONT_ENV`] value; an unset or empty value keeps `self`.
    pub fn with_override(self, value: Option<OsString>) -> Self {
        match value {
            Some(v) if !v.is_empty() => {
                log::info!("{FONT_ENV} set; using {} for every font role", v.to_string_lossy());
                Self::single(v)
            }
            _ => self,
        }
    }

    /// Defaults, overridden by [`FONT_ENV`] when set.
    pub fn from_env() -> Self {
        Self::default().with_override(std::env::var_os(FONT_ENV))
    }

    pub fn for_role(&self, role: FontRole) -> &[PathBuf] {
        match role {
            FontRole::Light => &self.light,
            FontRole::Regular => &self.regular,
            FontRole::Black => &self.black,
        }
    }
}

/// Everything the clock app needs to start.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Share of the viewport's shorter side covered by the face.
    pub fill: f32,
    pub background: Color,
    /// Color of ticks, dot and numerals.
    pub ink: Color,
    pub fonts: FontSources,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            title: "dial".to_string(),
            width: 800.0,
            height: 800.0,
            fill: DEFAULT_FILL,
            background: Color::WHITE,
            ink: Color::BLACK,
            fonts: FontSources::default(),
        }
    }
}

impl ClockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Must lie in `(0, 1]`; anything else keeps the default.
    pub fn fill(mut self, fill: f32) -> Self {
        self.fill = if fill > 0.0 && fill <= 1.0 { fill } else { DEFAULT_FILL };
        self
    }

    pub fn background(mut self, c: Color) -> Self {
        self.background = c;
        self
    }

    pub fn ink(mut self, c: Color) -> Self {
        self.ink = c;
        self
    }

    pub fn fonts(mut self, fonts: FontSources) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_cover_every_role() {
        let s = FontSources::default();
        for role in FontRole::ALL {
            assert!(!s.for_role(role).is_empty(), "{role:?}");
        }
        assert!(s.regular[0].ends_with("DejaVuSans.ttf"));
        assert!(s.black.iter().any(|p| p.ends_with("NotoSans-Black.ttf")));
    }

    #[test]
    fn override_replaces_every_role() {
        let s = FontSources::default().with_override(Some("/tmp/face.ttf".into()));
        assert_eq!(s, FontSources::single("/tmp/face.ttf"));
        assert_eq!(s.for_role(FontRole::Light), [PathBuf::from("/tmp/face.ttf")]);
    }

    #[test]
    fn empty_override_is_ignored() {
        let s = FontSources::default().with_override(Some(OsString::new()));
        assert_eq!(s, FontSources::default());
        assert_eq!(FontSources::default().with_override(None), FontSources::default());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = ClockConfig::new()
            .title("clock")
            .size(1000.0, 800.0)
            .fill(0.5)
            .ink(Color::WHITE)
            .background(Color::BLACK);
        assert_eq!(cfg.title, "clock");
        assert_eq!(cfg.fill, 0.5);
        assert_eq!(cfg.ink, Color::WHITE);

        let rc = cfg.runtime_config();
        assert_eq!(rc.title, "clock");
        assert_eq!(rc.initial_size, LogicalSize::new(1000.0, 800.0));
    }

    #[test]
    fn bad_fill_keeps_default() {
        assert_eq!(ClockConfig::new().fill(0.0).fill, DEFAULT_FILL);
        assert_eq!(ClockConfig::new().fill(1.5).fill, DEFAULT_FILL);
        assert_eq!(ClockConfig::new().fill(f32::NAN).fill, DEFAULT_FILL);
        assert_eq!(ClockConfig::new().fill(1.0).fill, 1.0);
    }
}
