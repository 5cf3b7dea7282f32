//! Theme Settings
//!
//! The slice of AudioMine's `settings.json` the theming layer owns: an
//! optional user stylesheet path. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ThemeError;

/// Persisted theme settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to a user-supplied `.qss` overriding the built-in theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load settings, treating a missing or broken file as defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("ignoring settings file {}: {e}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Write settings back to disk
    pub fn save(&self, path: &Path) -> Result<(), ThemeError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
