//! Persisted form values
//!
//! The last used folder, output file, extension and overwrite toggle are kept
//! in `settings.json` under the app data directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DatasetError, Result};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub last_root_dir: Option<String>,
    pub last_output_file: Option<String>,
    pub extension: String,
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_root_dir: None,
            last_output_file: None,
            extension: "py".to_string(),
            overwrite: false,
        }
    }
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

/// Load settings, falling back to defaults when the file is missing or unreadable
pub fn load_settings(data_dir: &Path) -> Settings {
    let path = settings_path(data_dir);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return Settings::default(),
    };

    match serde_json::from_str(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

pub fn save_settings(data_dir: &Path, settings: &Settings) -> Result<()> {
    fs::create_dir_all(data_dir).map_err(|e| DatasetError::io(data_dir, e))?;
    let path = settings_path(data_dir);
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(&path, json).map_err(|e| DatasetError::io(&path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            last_root_dir: Some("/home/me/project".to_string()),
            last_output_file: Some("/home/me/data.jsonl".to_string()),
            extension: "rs".to_string(),
            overwrite: true,
        };

        save_settings(dir.path(), &settings).unwrap();
        assert_eq!(load_settings(dir.path()), settings);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), "{ not json").unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(settings_path(dir.path()), r#"{"overwrite":true}"#).unwrap();
        let settings = load_settings(dir.path());
        assert!(settings.overwrite);
        assert_eq!(settings.extension, "py");
    }
}
