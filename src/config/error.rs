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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing score must be between 0 and 10, got {0}")]
    MissingScoreOutOfRange(u8),

    #[error("Simulation count must be greater than zero")]
    ZeroSimulations,

    #[error("Simulation count exceeds maximum allowed ({max})")]
    TooManySimulations { max: u32 },

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
