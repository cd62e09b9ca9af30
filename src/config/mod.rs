//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `SALESCHAT_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use saleschat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Analysis service at {}", config.service.url);
//! ```

mod error;
mod service;
mod session;

pub use error::{ConfigError, ValidationError};
pub use service::ServiceConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so the application starts with no environment
/// at all and points at a local analysis service.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Analysis service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Session manager tunables
    #[serde(default)]
    pub session: SessionConfig,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `SALESCHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SALESCHAT__SERVICE__URL=wss://...` -> `service.url = wss://...`
    /// - `SALESCHAT__SESSION__ANALYSIS_TIMEOUT_SECS=60` -> `session.analysis_timeout_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SALESCHAT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

fn default_log_level() -> String {
    "info,saleschat=debug".to_string()
}
