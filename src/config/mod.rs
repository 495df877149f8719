//! Configuration management for TableForge.
//!
//! Settings live in a TOML file. The location is taken from the
//! `TABLEFORGE_CONFIG` environment variable when set, otherwise it is
//! `<config dir>/tableforge/config.toml`. A missing file means defaults.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use settings::{Settings, DEFAULT_PAGE_SIZE, DEFAULT_TICK_RATE_MS};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "TABLEFORGE_CONFIG";

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Failed to create the config directory.
    #[error("Failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// Failed to read the config file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file.
    #[error("Failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The config file is not valid TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A setting has an invalid value.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The application configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application-wide settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from its default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from a file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save the configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// The path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tableforge").join("config.toml"))
    }

    /// Check that all settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.settings.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "page_size must be greater than zero".to_string(),
            ));
        }
        if self.settings.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        if self.settings.ignored_fields.iter().any(|n| n.is_empty()) {
            return Err(ConfigError::ValidationError(
                "ignored field names cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
