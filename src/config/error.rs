//! Configuration error types

use thiserror::Error;

use crate::domain::UnknownAction;

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
    #[error("Auth token is missing or empty")]
    MissingToken,

    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error("Registration endpoint URL is empty")]
    MissingRegistrationUrl,

    #[error("Feed URL is empty")]
    MissingFeedUrl,
}
