//! Configuration management for the application.
//!
//! This module handles loading and validating build settings in TOML format
//! with platform-specific directory resolution.

use crate::constants::{APP_BINARY_NAME, DEFAULT_DIST_DIR, DEFAULT_GEOMETRY};
use crate::export::driver::RenderOptions;
use crate::registry::Registry;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "KALAMINE_CONFIG_DIR";

/// Output files written by `build`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the generated drivers
    pub dist_dir: PathBuf,
    /// Also write a UTF-8 copy of each KLC file (`<name>_utf8.klc`)
    pub utf8_klc: bool,
    /// Also write the web keymap (`<name>.json`)
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            utf8_klc: true,
            json: true,
        }
    }
}

/// Layout previews drawn in driver headers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Geometry the previews are drawn on
    pub geometry: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            geometry: DEFAULT_GEOMETRY.to_string(),
        }
    }
}

/// XKB output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct XkbConfig {
    /// Append the produced characters as a comment to every key line
    pub show_description: bool,
}

impl Default for XkbConfig {
    fn default() -> Self {
        Self {
            show_description: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output files
    pub output: OutputConfig,
    /// Header previews
    pub preview: PreviewConfig,
    /// XKB settings
    pub xkb: XkbConfig,
}

impl Config {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform configuration directory of the application.
    ///
    /// - Linux: `~/.config/kalamine/`
    /// - macOS: `~/Library/Application Support/kalamine/`
    /// - Windows: `%APPDATA%\kalamine\`
    ///
    /// `KALAMINE_CONFIG_DIR` overrides the location.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Path of `config.toml` in [`Config::config_dir`].
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads the user configuration, or defaults if there is none.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads the configuration at `path`. Missing keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects empty paths and names.
    pub fn validate(&self) -> Result<()> {
        if self.output.dist_dir.as_os_str().is_empty() {
            anyhow::bail!("output.dist_dir must not be empty");
        }
        if self.preview.geometry.trim().is_empty() {
            anyhow::bail!("preview.geometry must not be empty");
        }
        Ok(())
    }

    /// Checks that the preview geometry is known to `registry`.
    pub fn validate_geometry(&self, registry: &Registry) -> Result<()> {
        if registry.geometry(&self.preview.geometry).is_none() {
            let available: Vec<&str> = registry.geometry_names().collect();
            anyhow::bail!(
                "Unknown preview geometry '{}' (available: {})",
                self.preview.geometry,
                available.join(", ")
            );
        }
        Ok(())
    }

    /// Driver rendering options from these settings.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            preview_geometry: self.preview.geometry.clone(),
            show_description: self.xkb.show_description,
        }
    }
}
