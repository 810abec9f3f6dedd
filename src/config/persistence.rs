//! Config file path resolution and YAML load/save for `LinkConfig`.

use super::LinkConfig;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

impl LinkConfig {
    /// Load the link config from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        log::info!("Link config path: {:?}", path);
        Self::load_from(&path).with_context(|| format!("Failed to load link config from {path:?}"))
    }

    /// Load the link config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Link config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        log::info!("Loaded link config from {:?}", path);
        Ok(config)
    }

    /// Save the link config to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Save the link config to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
            .with_context(|| format!("Failed to save link config to {path:?}"))
    }

    /// Get the link config file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("par-term").join("links.yaml")
            } else {
                PathBuf::from("links.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/par-term/links.yaml on all unix platforms, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("par-term").join("links.yaml")
            } else {
                PathBuf::from("links.yaml")
            }
        }
    }
}
