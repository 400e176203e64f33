//! Application configuration
//!
//! Loaded from `~/.config/gigboard/config.toml`. A missing file is normal
//! (defaults apply); a malformed file degrades to defaults with a warning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{CoreError, LoadSummary};

/// UI color scheme, persisted via preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    pub fn toggled(&self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }
}

/// Seller identity used when rendering templates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerProfile {
    /// Name signed under every message
    pub seller_name: String,
    /// Overrides the per-project service type in messages when set
    pub service_type: Option<String>,
    pub company: Option<String>,
}

impl Default for SellerProfile {
    fn default() -> Self {
        Self {
            seller_name: "Your Name".to_string(),
            service_type: None,
            company: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profile: SellerProfile,
    /// Extra templates loaded from this directory (*.md with front matter)
    pub templates_dir: Option<PathBuf>,
    /// Currency symbol for money display
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: SellerProfile::default(),
            templates_dir: None,
            currency: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Default config file location: `<config_dir>/gigboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gigboard").join("config.toml"))
    }

    /// Strict parse: reports the exact error
    pub fn parse(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        toml::from_str(&content).map_err(|e| CoreError::TomlParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Graceful load: missing file yields defaults silently, a malformed
    /// file yields defaults with a warning in the summary.
    pub fn load_or_default(path: Option<&Path>, summary: &mut LoadSummary) -> Self {
        let resolved = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => {
                debug!("No config directory available, using defaults");
                return Self::default();
            }
        };

        match Self::parse(&resolved) {
            Ok(config) => {
                summary.config_loaded = true;
                debug!(path = %resolved.display(), "Config loaded");
                config
            }
            Err(CoreError::FileNotFound { .. }) => {
                debug!(path = %resolved.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %resolved.display(), error = %e, "Bad config file, using defaults");
                summary.add_warning("config", e.to_string());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
currency = "€"
templates_dir = "/home/me/templates"

[profile]
seller_name = "Dana Velasquez"
service_type = "Business Intelligence"
"#
        )
        .unwrap();

        let config = AppConfig::parse(file.path()).unwrap();
        assert_eq!(config.currency, "€");
        assert_eq!(config.profile.seller_name, "Dana Velasquez");
        assert_eq!(
            config.profile.service_type.as_deref(),
            Some("Business Intelligence")
        );
        assert_eq!(
            config.templates_dir.as_deref(),
            Some(Path::new("/home/me/templates"))
        );
    }

    #[test]
    fn test_parse_missing_file_is_not_found() {
        let err = AppConfig::parse(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "currency = [unclosed").unwrap();

        let err = AppConfig::parse(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::TomlParse { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file_is_silent() {
        let mut summary = LoadSummary::new();
        let config = AppConfig::load_or_default(
            Some(Path::new("/nonexistent/config.toml")),
            &mut summary,
        );

        assert_eq!(config.profile.seller_name, "Your Name");
        assert!(!summary.config_loaded);
        assert!(!summary.has_warnings());
    }

    #[test]
    fn test_load_or_default_malformed_file_warns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "profile = 42").unwrap();

        let mut summary = LoadSummary::new();
        let config = AppConfig::load_or_default(Some(file.path()), &mut summary);

        assert_eq!(config.currency, "$");
        assert!(!summary.config_loaded);
        assert!(summary.has_warnings());
    }

    #[test]
    fn test_color_scheme_toggle() {
        assert_eq!(ColorScheme::Dark.toggled(), ColorScheme::Light);
        assert_eq!(ColorScheme::Light.toggled(), ColorScheme::Dark);
    }
}
