//! Store error types.

use newtab_core::CoreError;
use newtab_fetch::FetchError;
use newtab_providers::RegistryError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown settings key.
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    /// Provider selection error.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Invalid input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Probe setup error.
    #[error("Fetch setup failed: {0}")]
    Fetch(#[from] FetchError),
}

impl StoreError {
    /// Returns true if the error came from bad user-supplied configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::Config(_) | StoreError::UnknownKey(_) | StoreError::Registry(_)
        )
    }
}
