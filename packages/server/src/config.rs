//! Server configuration.
//!
//! Read from the environment (`BIND_ADDR`, `PORT`, `LOCATION_DATASET`,
//! `DEFAULT_LOCALE`) or from a TOML file with the same settings in
//! `snake_case`. Missing or unparsable values fall back to the defaults.

use std::path::Path;

use risk_prevalence_locale::DEFAULT_LOCALE;
use risk_prevalence_location::DatasetSource;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has the wrong shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Dataset path or URL.
    pub dataset: String,
    /// Locale used when a request names none.
    pub default_locale: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            dataset: "data/location.json".to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            dataset: std::env::var("LOCATION_DATASET").unwrap_or(defaults.dataset),
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
        }
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        log::info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    #[must_use]
    pub fn dataset_source(&self) -> DatasetSource {
        DatasetSource::parse(&self.dataset)
    }
}
