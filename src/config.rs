// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! User configuration stored as TOML in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::export::SvgExportMode;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Category applied to every icon; blank means "use the frame's folder name".
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub export_mode: SvgExportMode,
    #[serde(default = "default_include_manifest")]
    pub include_manifest: bool,
    /// Number of background workers; 0 picks one per core (at least two).
    #[serde(default)]
    pub worker_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category: String::new(),
            export_mode: SvgExportMode::default(),
            include_manifest: default_include_manifest(),
            worker_threads: 0,
        }
    }
}

fn default_include_manifest() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    ConfigDirError,
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from the default location, creating it when missing.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents =
                fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
            Ok(toml::from_str(&contents)?)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            log::info!("created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Write configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("app", "iconpack", "iconpack")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::ConfigDirError)
    }

    /// Resolved worker count for the command pool.
    pub fn workers(&self) -> usize {
        if self.worker_threads > 0 {
            return self.worker_threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn load_from_creates_default_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_fills_missing_keys_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "category = \"Navigation\"\nexport_mode = \"normalized\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.category, "Navigation");
        assert_eq!(config.export_mode, SvgExportMode::Normalized);
        assert!(config.include_manifest);
        assert_eq!(config.worker_threads, 0);
    }

    #[test]
    fn load_from_reports_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "export_mode = \"pixels\"").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn workers_respects_explicit_count() {
        let config = Config {
            worker_threads: 3,
            ..Config::default()
        };

        assert_eq!(config.workers(), 3);
        assert!(Config::default().workers() >= 2);
    }
}
