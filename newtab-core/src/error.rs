//! Core error types for newtab.

use thiserror::Error;

/// Core error type for newtab operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The page URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page URL parsed but carries no hostname.
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// Icon sizes must be positive.
    #[error("Invalid icon size: {0}px")]
    InvalidIconSize(u32),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns true if the error stems from caller input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::MissingHost(_) | Self::InvalidIconSize(_)
        )
    }
}
