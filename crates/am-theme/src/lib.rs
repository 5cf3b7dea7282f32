//! AudioMine Theme
//!
//! The built-in dark theme plus loading of user `.qss` files with
//! fallback. Theme load never fails hard: worst case the application
//! runs on the built-in dark look.

mod config;
pub mod palette;

pub use config::Settings;

use std::fs;
use std::path::{Path, PathBuf};

use am_qss::{parse_stylesheet, PropertyValue, QssError, StyleResolver, Stylesheet};

/// The built-in dark theme, embedded at compile time
pub const DARK_QSS: &str = include_str!("../themes/dark.qss");

/// Theme loading error
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] QssError),
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// A named, parsed theme
#[derive(Debug)]
pub struct Theme {
    pub name: String,
    pub stylesheet: Stylesheet,
}

impl Theme {
    /// The built-in dark theme
    pub fn dark() -> Self {
        match Self::from_qss("dark", DARK_QSS) {
            Ok(theme) => theme,
            Err(e) => {
                // The embedded sheet is covered by tests; this path
                // exists so a bad build does not panic the player.
                tracing::error!("built-in theme failed to parse: {e}");
                Self {
                    name: "dark".to_string(),
                    stylesheet: Stylesheet::default(),
                }
            }
        }
    }

    /// Parse a theme from QSS text. Per-rule problems are logged and
    /// reported in the sheet's diagnostics, not treated as failure.
    pub fn from_qss(name: impl Into<String>, qss: &str) -> Result<Self, ThemeError> {
        let stylesheet = parse_stylesheet(qss)?;
        for diag in &stylesheet.diagnostics {
            tracing::warn!("theme: {diag}");
        }
        Ok(Self {
            name: name.into(),
            stylesheet,
        })
    }

    /// Load a user theme from disk
    pub fn try_load(path: &Path) -> Result<Self, ThemeError> {
        let qss = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        Self::from_qss(name, &qss)
    }

    /// Load a user theme, falling back to the built-in dark theme if
    /// the file is missing or unparseable
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!(
                    "failed to load theme {}: {e}; using built-in dark theme",
                    path.display()
                );
                Self::dark()
            }
        }
    }

    /// Load the theme named by the settings, or the built-in default
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.stylesheet {
            Some(path) => Self::load(path),
            None => Self::dark(),
        }
    }

    /// A resolver over just this theme
    pub fn resolver(self) -> StyleResolver {
        StyleResolver::with_sheet(self.stylesheet)
    }

    /// Paths of `url(...)` references that do not exist under `base`.
    ///
    /// Missing images are not an error: the widget renders without the
    /// image. This walks the sheet so the caller can warn up front.
    pub fn missing_assets(&self, base: &Path) -> Vec<PathBuf> {
        let mut missing = Vec::new();
        for rule in &self.stylesheet.rules {
            for decl in &rule.declarations {
                collect_missing_urls(&decl.value, base, &mut missing);
            }
        }
        for path in &missing {
            tracing::warn!("theme references missing asset {}", path.display());
        }
        missing
    }
}

fn collect_missing_urls(value: &PropertyValue, base: &Path, missing: &mut Vec<PathBuf>) {
    match value {
        PropertyValue::Url(url) => {
            let path = base.join(url);
            if !path.exists() {
                missing.push(path);
            }
        }
        PropertyValue::List(items) => {
            for item in items {
                collect_missing_urls(item, base, missing);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_qss::{Color, PropertyId, WidgetInfo, WidgetSnapshot};

    #[test]
    fn test_dark_theme_parses_clean() {
        let theme = Theme::dark();
        assert!(!theme.stylesheet.is_empty());
        assert!(
            theme.stylesheet.diagnostics.is_empty(),
            "built-in theme has diagnostics: {:?}",
            theme.stylesheet.diagnostics
        );
    }

    #[test]
    fn test_dark_theme_button_hover() {
        let resolver = Theme::dark().resolver();
        let hovered = WidgetSnapshot::of(WidgetInfo::new("QPushButton").hovered());
        assert_eq!(
            resolver.resolve(&hovered).get(PropertyId::BackgroundColor),
            Some(&PropertyValue::Color(palette::ACCENT_HOVER))
        );
    }

    #[test]
    fn test_dark_theme_disabled_wins_over_hover() {
        let resolver = Theme::dark().resolver();
        let mut info = WidgetInfo::new("QPushButton");
        info.states.hover = true;
        info.states.disabled = true;
        assert_eq!(
            resolver
                .resolve(&WidgetSnapshot::of(info))
                .get(PropertyId::BackgroundColor),
            Some(&PropertyValue::Color(palette::BORDER))
        );
    }

    #[test]
    fn test_fallback_on_missing_file() {
        let theme = Theme::load(Path::new("/nonexistent/theme.qss"));
        assert_eq!(theme.name, "dark");
        assert!(!theme.stylesheet.is_empty());
    }

    #[test]
    fn test_user_theme_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hot_pink.qss");
        fs::write(&path, "QPushButton { background-color: #ff69b4; }").unwrap();

        let theme = Theme::load(&path);
        assert_eq!(theme.name, "hot_pink");
        let resolver = theme.resolver();
        assert_eq!(
            resolver
                .resolve(&WidgetSnapshot::of(WidgetInfo::new("QPushButton")))
                .get(PropertyId::BackgroundColor),
            Some(&PropertyValue::Color(Color::rgb(0xff, 0x69, 0xb4)))
        );
    }

    #[test]
    fn test_missing_assets_reported() {
        let dir = tempfile::tempdir().unwrap();
        let theme = Theme::from_qss(
            "icons",
            "QPushButton { image: url(icons/play.png); }",
        )
        .unwrap();
        let missing = theme.missing_assets(dir.path());
        assert_eq!(missing.len(), 1);
        assert!(missing[0].ends_with("icons/play.png"));

        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/play.png"), b"png").unwrap();
        assert!(theme.missing_assets(dir.path()).is_empty());
    }
}
