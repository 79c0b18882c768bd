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
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Log filter directive cannot be empty")]
    EmptyLogLevel,

    #[error("Maximum matrix dimension must be at least 1")]
    InvalidMaxDimension,

    #[error("Consistency threshold must be in (0, 1], got {0}")]
    InvalidConsistencyThreshold(f64),

    #[error("Reciprocal precision must be at most 12 decimals, got {0}")]
    InvalidReciprocalPrecision(u32),
}
