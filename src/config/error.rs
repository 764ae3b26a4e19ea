//! Configuration error types

use thiserror::Error;

/// Errors that occur while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying config crate error (missing variable, parse failure, ...)
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors that occur during semantic validation of loaded configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required configuration value '{0}' is missing")]
    MissingRequired(&'static str),

    #[error("configuration value '{field}' is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Creates an invalid-value validation error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
