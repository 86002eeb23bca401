#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for jdkup
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/jdkup/config.toml)
//! - Environment variables (`JDKUP_*`)
//! - CLI flags (applied by the app)

pub mod constants;
pub use constants as fixed_paths;

use jdkup_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub platform: PlatformConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory containing the recipe TOML files
    pub recipes_dir: Option<PathBuf>,
}

/// Privileged-execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// How subprocesses acquire elevated privileges
    #[serde(default = "default_elevation")]
    pub elevation: ElevationMode,
}

/// Color output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

/// How privileged filesystem mutations are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationMode {
    /// Prefix every system utility invocation with sudo (production default)
    Sudo,
    /// Run utilities directly; for tests and already-elevated callers
    None,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            elevation: ElevationMode::Sudo,
        }
    }
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_elevation() -> ElevationMode {
    ElevationMode::Sudo
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("jdkup").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        // No resolvable config directory means no config file to load
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // JDKUP_COLOR
        if let Ok(color) = std::env::var("JDKUP_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "JDKUP_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // JDKUP_RECIPES_DIR
        if let Ok(dir) = std::env::var("JDKUP_RECIPES_DIR") {
            self.paths.recipes_dir = Some(PathBuf::from(dir));
        }

        // JDKUP_ELEVATION
        if let Ok(elevation) = std::env::var("JDKUP_ELEVATION") {
            self.platform.elevation = match elevation.as_str() {
                "sudo" => ElevationMode::Sudo,
                "none" => ElevationMode::None,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "JDKUP_ELEVATION".to_string(),
                        value: elevation,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Get the recipes directory (with default)
    #[must_use]
    pub fn recipes_dir(&self) -> PathBuf {
        self.paths
            .recipes_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_RECIPES_DIR))
    }
}
