//! Configuration management and validation
//!
//! Provides the layered configuration used by the convert command:
//! built-in defaults, an optional TOML config file, and CLI argument
//! overrides applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_COORDINATE_COLUMN, DEFAULT_LOG_LEVEL, LOG_LEVELS};
use crate::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Processing parameters
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Logging parameters
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory holding the four AltaLIS reference grid collections
    pub grid_path: Option<PathBuf>,

    /// Input CSV file with the coordinate (and optional title) columns
    pub input_path: Option<PathBuf>,

    /// Output point dataset path; must not already exist
    pub output_path: Option<PathBuf>,

    /// Name of the input column holding ATS coordinates
    pub coordinate_column: String,

    /// Name of the input column holding row titles, when titles are wanted
    pub title_column: Option<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            grid_path: None,
            input_path: None,
            output_path: None,
            coordinate_column: DEFAULT_COORDINATE_COLUMN.to_string(),
            title_column: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug or trace
    pub level: String,

    /// Include timestamps and full formatting in log output
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            structured: true,
        }
    }
}

impl Config {
    /// Default config file location under the user configuration directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Cannot determine user config directory"))?;
        Ok(config_dir.join("ats-converter").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration with the layered approach (defaults -> file)
    ///
    /// When no explicit file is given the default location is tried;
    /// a missing default file simply yields the built-in defaults.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path().ok();
                match default_path.filter(|path| path.exists()) {
                    Some(path) => Self::from_file(&path),
                    None => {
                        debug!("No config file found, using defaults");
                        Ok(Self::default())
                    }
                }
            }
        }
    }

    /// Validate the effective configuration before processing
    pub fn validate(&self) -> Result<()> {
        if self.processing.grid_path.is_none() {
            return Err(Error::configuration(
                "No reference grid directory configured; pass --grid or set processing.grid_path",
            ));
        }

        if self.processing.input_path.is_none() {
            return Err(Error::configuration(
                "No input table configured; pass --input or set processing.input_path",
            ));
        }

        if self.processing.output_path.is_none() {
            return Err(Error::configuration(
                "No output path configured; pass --output or set processing.output_path",
            ));
        }

        if self.processing.coordinate_column.trim().is_empty() {
            return Err(Error::configuration(
                "Coordinate column name cannot be empty",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}'. Accepted levels: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
