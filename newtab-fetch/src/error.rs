//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for probe and pipeline operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP layer failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered, but not with 2xx or 3xx.
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// Rate limited by the provider.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// Core error (bad input).
    #[error("Core error: {0}")]
    Core(#[from] newtab_core::CoreError),

    /// The pipeline has nothing to try.
    #[error("No providers configured")]
    NoProviders,

    /// Every provider was tried and none answered.
    #[error("All providers failed")]
    AllProvidersFailed,
}

impl FetchError {
    /// Returns true for errors that come from the network rather than the input.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::UnexpectedStatus(_) | Self::RateLimited { .. }
        )
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Only http and https are probed.
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

impl HttpError {
    /// Returns true if the underlying request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// Returns true if the request never reached the server.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect())
    }
}
