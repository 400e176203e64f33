//! User preferences persistence for gigboard
//!
//! Stores UI preferences (color scheme) in `<data_dir>/gigboard/preferences.json`.

use crate::config::ColorScheme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// gigboard-specific user preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Color scheme (dark / light)
    pub color_scheme: ColorScheme,
}

impl UiPreferences {
    /// Default preferences directory: `<data_dir>/gigboard`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("gigboard"))
    }

    /// Load preferences from `<dir>/preferences.json`.
    /// Returns defaults on any I/O or parse error.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("preferences.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences to `<dir>/preferences.json`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).context("Failed to create preferences directory")?;
        let path = dir.join("preferences.json");
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }
}
