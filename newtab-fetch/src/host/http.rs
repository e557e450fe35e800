//! HTTP client with tracing and scheme checks.
//!
//! This module wraps `reqwest` and adds:
//! - Request/response tracing
//! - Refusal of anything that is not `http` or `https`
//! - `HEAD` support for cheap existence checks

use reqwest::{header, Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for newtab.
const USER_AGENT: &str = concat!("newtab/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and scheme checks.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: client,
            timeout,
        })
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks that a URL is absolute and uses a web scheme.
    fn check_url(url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(HttpError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Performs a HEAD request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn head(&self, url: &str) -> Result<Response, HttpError> {
        Self::check_url(url)?;
        debug!("HEAD request");

        let response = self.inner.head(url).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        Self::check_url(url)?;
        debug!("GET request");

        let response = self.inner.get(url).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;

    /// Check if the server refused the method rather than the resource.
    fn is_method_rejected(&self) -> bool;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    fn is_method_rejected(&self) -> bool {
        matches!(
            self.status(),
            reqwest::StatusCode::METHOD_NOT_ALLOWED | reqwest::StatusCode::NOT_IMPLEMENTED
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_schemes_allowed() {
        assert!(HttpClient::check_url("https://www.google.com/s2/favicons").is_ok());
        assert!(HttpClient::check_url("http://intranet.local/favicon.ico").is_ok());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(matches!(
            HttpClient::check_url("ftp://files.example.com/favicon.ico"),
            Err(HttpError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            HttpClient::check_url("data:image/png;base64,AAAA"),
            Err(HttpError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            HttpClient::check_url("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_client_keeps_timeout() {
        let client = HttpClient::with_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }
}
