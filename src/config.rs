//! Dashboard settings.
//!
//! Read from `dashboard.json` in the working directory when it exists;
//! every field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV loaded at startup.
    pub data_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    /// Rows shown in the filtered-data preview.
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/university_student_dashboard_data.csv"),
            window_width: 1280.0,
            window_height: 860.0,
            preview_rows: 50,
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `dashboard.json` if present; a broken file is logged and ignored.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(Path::new(CONFIG_FILE))
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Using settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(
            config.data_path,
            PathBuf::from("data/university_student_dashboard_data.csv")
        );
        assert_eq!(config.preview_rows, 50);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_path": "other.csv", "unknown": 1 }}"#).unwrap();
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.window_width, 1280.0);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(DashboardConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default_from(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_malformed_config_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "preview_rows": "many" }}"#).unwrap();
        let config = DashboardConfig::load_or_default_from(file.path());
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_valid_config_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "preview_rows": 10 }}"#).unwrap();
        let config = DashboardConfig::load_or_default_from(file.path());
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.window_height, 860.0);
    }
}
