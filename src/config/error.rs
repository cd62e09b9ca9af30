//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Service URL must use the ws:// or wss:// scheme")]
    InvalidServiceUrl,

    #[error("Invalid timeout")]
    InvalidTimeout,

    #[error("Event channel capacity must be non-zero")]
    InvalidChannelCapacity,
}
