//! TOML-based application configuration.
//!
//! The config file lives under `~/.config/daykeeper/`, next to the journal
//! it points at by default. `DAYKEEPER_ENV=dev` switches the whole tree to
//! `daykeeper-dev`, so a development build never touches the real journal.
//! Directories are created lazily on the first save, not on resolution.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage-related overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Absolute path of the journal file. Defaults to
    /// `journal.json` inside the config directory when unset.
    #[serde(default)]
    pub journal_path: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/daykeeper/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Directory holding the config file and, unless overridden, the
    /// journal. Honors `DAYKEEPER_ENV=dev`.
    pub fn dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or_else(|| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: "home directory could not be resolved".to_string(),
        })?;
        let tree = match std::env::var("DAYKEEPER_ENV").as_deref() {
            Ok("dev") => "daykeeper-dev",
            _ => "daykeeper",
        };
        Ok(home.join(".config").join(tree))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| match e {
            ConfigError::LoadFailed { path, message } => ConfigError::SaveFailed { path, message },
            other => other,
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// The journal path this configuration resolves to.
    pub fn journal_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.journal_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("journal.json")),
        }
    }
}
