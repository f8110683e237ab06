//! Configuration management
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//!
//! # Usage
//!
//! ```no_run
//! use mclogs_uploader::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Uploading to: {}", config.api.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `MCLOGS__<section>__<key>`:
//! - `MCLOGS__API__BASE_URL=http://localhost:8080`
//! - `MCLOGS__HTTP__PROXY=http://proxy:3128`
//! - `MCLOGS__UPLOAD__WARN_CONTENT_BYTES=5MB`
//! - `MCLOGS__CLIPBOARD__FALLBACK_COMMAND="xclip -selection clipboard"`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/mclogs.toml`.
//! This can be overridden using the `MCLOGS_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{
    ApiConfig, ClipboardSettings, Config, HttpSettings, TelemetryConfig, UploadSettings,
};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or a value
    /// fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
