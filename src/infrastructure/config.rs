// src/infrastructure/config.rs
use crate::constants::{APP_DIR, DEFAULT_THEME};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration, `<config-dir>/notemark/config.toml`.
///
/// Every key is optional; an absent file means all defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Data directory override; empty means use the platform default.
    #[serde(default = "default_dir")]
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// Syntect theme used for fenced code blocks.
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EditorConfig {
    /// Editor program; empty means defer to $VISUAL / $EDITOR.
    #[serde(default = "default_program")]
    pub program: String,
}

// Default value functions
fn default_dir() -> String {
    String::new()
}
fn default_color() -> bool {
    true
}
fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
fn default_program() -> String {
    String::new()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            theme: default_theme(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load the user's configuration, falling back to defaults when the file
    /// does not exist.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config file");
                Self::load(&path)
                    .with_context(|| format!("Invalid config at {}", path.display()))
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config-dir>/notemark/config.toml`, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }
}
