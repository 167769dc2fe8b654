//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which selects the color scheme, the session storage backend, and an
//! optional data directory override.
//!
//! Configuration is stored at `~/.config/meetdesk/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::{FileStorage, KeyringStorage, Storage};
use crate::theme::ColorScheme;

/// Application name used for config/data directory paths and the keychain service
pub const APP_NAME: &str = "meetdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "MEETDESK_DATA_DIR";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color_scheme: ColorScheme,
    pub storage: StorageBackend,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::MissingDirectory("config"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the session snapshot and logs.
    ///
    /// `MEETDESK_DATA_DIR` wins over the config file, which wins over the
    /// platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let from_env = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Ok(resolve_data_dir(from_env, self.data_dir.clone(), dirs::data_dir())?)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }

    /// Build the storage backend the session store persists into.
    pub fn open_storage(&self) -> Result<Box<dyn Storage>> {
        let storage: Box<dyn Storage> = match self.storage {
            StorageBackend::File => Box::new(FileStorage::new(self.data_dir()?)),
            StorageBackend::Keyring => Box::new(KeyringStorage::new(APP_NAME)),
        };
        Ok(storage)
    }
}

fn resolve_data_dir(
    from_env: Option<PathBuf>,
    from_config: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Result<PathBuf, StorageError> {
    if let Some(dir) = from_env.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    if let Some(dir) = from_config {
        return Ok(dir);
    }
    platform
        .map(|d| d.join(APP_NAME))
        .ok_or(StorageError::MissingDirectory("data"))
}
