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
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid Telegram bot token format")]
    InvalidBotToken,

    #[error("Telegram URL must use HTTPS: {0}")]
    UrlMustBeHttps(&'static str),

    #[error("Telegram webhook secret must be 1-256 characters of A-Z, a-z, 0-9, _ or -")]
    InvalidWebhookSecret,

    #[error("Webhook secret is required in production")]
    WebhookSecretRequired,

    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),
}
