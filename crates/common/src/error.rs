//! Configuration error types for FAQDesk

use thiserror::Error;

/// Common result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while assembling client configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
