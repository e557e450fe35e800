//! Existence probes for candidate icon URLs.
//!
//! A probe answers one question: does this URL respond like a real resource?
//! It does not download or decode the image. Any 2xx or 3xx status counts as
//! success; network failures and other statuses are errors.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::FetchError;
use crate::host::http::{HttpClient, ResponseExt};
use crate::retry::RetryStrategy;

// ============================================================================
// Probe Method
// ============================================================================

/// How a candidate URL is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMethod {
    /// `HEAD`, repeated as `GET` if the server refuses the method.
    #[default]
    Head,
    /// Plain `GET`. For endpoints known to mishandle `HEAD`.
    Get,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("HEAD"),
            Self::Get => f.write_str("GET"),
        }
    }
}

// ============================================================================
// Probe Result
// ============================================================================

/// Result of a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Status code of the final response.
    pub status_code: Option<u16>,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

impl ProbeResult {
    /// Creates a result.
    pub fn new(status_code: Option<u16>, elapsed: Duration) -> Self {
        Self {
            status_code,
            response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// ============================================================================
// Probe Trait
// ============================================================================

/// Checks whether a candidate icon URL exists.
///
/// The resolver only talks to the network through this trait, so tests can
/// substitute a scripted implementation and count calls.
#[async_trait]
pub trait Probe: Send + Sync + fmt::Debug {
    /// Probes `url`. `Ok` means the candidate is acceptable.
    async fn probe(&self, url: &str, method: ProbeMethod) -> Result<ProbeResult, FetchError>;
}

/// Maps a final response status onto the probe contract.
pub fn classify_status(status: StatusCode, retry_after: Option<u64>) -> Result<(), FetchError> {
    if status.is_success() || status.is_redirection() {
        return Ok(());
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::RateLimited { retry_after });
    }
    Err(FetchError::UnexpectedStatus(status.as_u16()))
}

// ============================================================================
// HTTP Probe
// ============================================================================

/// Probe backed by real HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: HttpClient,
    retry: RetryStrategy,
}

impl HttpProbe {
    /// Creates a probe with the given per-request timeout and no retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: HttpClient::with_timeout(timeout)?,
            retry: RetryStrategy::default(),
        })
    }

    /// Wraps an existing client.
    pub fn with_client(client: HttpClient) -> Self {
        Self {
            client,
            retry: RetryStrategy::default(),
        }
    }

    /// Sets the retry strategy for transport failures.
    pub fn with_retry_strategy(mut self, retry: RetryStrategy) -> Self {
        self.retry = retry;
        self
    }

    async fn send(&self, url: &str, method: ProbeMethod) -> Result<reqwest::Response, FetchError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            let result = match method {
                ProbeMethod::Head => self.client.head(url).await,
                ProbeMethod::Get => self.client.get(url).await,
            };

            match result {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if attempts < self.retry.max_attempts && self.retry.should_retry(&e) {
                        let delay = self.retry.delay_for_attempt(attempts);
                        debug!(
                            url = %url,
                            error = %e,
                            delay_ms = delay.as_millis(),
                            "Probe request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    if e.is_timeout() {
                        return Err(FetchError::Timeout(self.client.timeout().as_secs()));
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str, method: ProbeMethod) -> Result<ProbeResult, FetchError> {
        let start = Instant::now();
        debug!(url = %url, method = %method, "Running probe");

        let mut response = self.send(url, method).await?;
        if method == ProbeMethod::Head && response.is_method_rejected() {
            debug!(url = %url, status = %response.status(), "HEAD refused, falling back to GET");
            response = self.send(url, ProbeMethod::Get).await?;
        }

        let status = response.status();
        classify_status(status, response.retry_after_secs())?;

        Ok(ProbeResult::new(Some(status.as_u16()), start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one request per connection on localhost.
    ///
    /// `/icon.ico` refuses `HEAD` with 405 and answers `GET` with 200,
    /// `/legacy.ico` refuses `HEAD` with 501, everything else is 404. Returns
    /// the base URL and the `METHOD path` lines received.
    async fn spawn_icon_server() -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let log = log.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&buf);
                    let mut parts = head.split_whitespace();
                    let method = parts.next().unwrap_or_default().to_string();
                    let path = parts.next().unwrap_or_default().to_string();
                    log.lock().unwrap().push(format!("{method} {path}"));

                    let (status, body) = match (method.as_str(), path.as_str()) {
                        ("HEAD", "/icon.ico") => ("405 Method Not Allowed", ""),
                        ("GET", "/icon.ico" | "/legacy.ico") => ("200 OK", "icon"),
                        ("HEAD", "/legacy.ico") => ("501 Not Implemented", ""),
                        _ => ("404 Not Found", ""),
                    };
                    let body = if method == "HEAD" { "" } else { body };
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), requests)
    }

    #[test]
    fn test_success_and_redirect_statuses_pass() {
        assert!(classify_status(StatusCode::OK, None).is_ok());
        assert!(classify_status(StatusCode::NO_CONTENT, None).is_ok());
        assert!(classify_status(StatusCode::MOVED_PERMANENTLY, None).is_ok());
        assert!(classify_status(StatusCode::FOUND, None).is_ok());
    }

    #[test]
    fn test_error_statuses_fail() {
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, None),
            Err(FetchError::UnexpectedStatus(404))
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, None),
            Err(FetchError::UnexpectedStatus(502))
        ));
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, Some(30)),
            Err(FetchError::RateLimited { retry_after: Some(30) })
        ));
    }

    #[test]
    fn test_probe_method_display() {
        assert_eq!(ProbeMethod::Head.to_string(), "HEAD");
        assert_eq!(ProbeMethod::Get.to_string(), "GET");
        assert_eq!(ProbeMethod::default(), ProbeMethod::Head);
    }

    #[tokio::test]
    async fn test_non_web_url_fails_without_network() {
        let probe = HttpProbe::new(Duration::from_secs(1)).unwrap();
        let result = probe.probe("ftp://example.com/favicon.ico", ProbeMethod::Head).await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[test]
    fn test_probe_result_millis() {
        let result = ProbeResult::new(Some(200), Duration::from_millis(42));
        assert_eq!(result.response_time_ms, 42);
    }

    #[tokio::test]
    async fn test_head_refused_falls_back_to_get() {
        let (base, requests) = spawn_icon_server().await;
        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

        let result = probe
            .probe(&format!("{base}/icon.ico"), ProbeMethod::Head)
            .await
            .unwrap();

        assert_eq!(result.status_code, Some(200));
        assert_eq!(
            *requests.lock().unwrap(),
            vec!["HEAD /icon.ico".to_string(), "GET /icon.ico".to_string()]
        );
    }

    #[tokio::test]
    async fn test_head_not_implemented_falls_back_to_get() {
        let (base, _requests) = spawn_icon_server().await;
        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

        let result = probe.probe(&format!("{base}/legacy.ico"), ProbeMethod::Head).await;
        assert!(matches!(result, Ok(ProbeResult { status_code: Some(200), .. })));
    }

    #[tokio::test]
    async fn test_missing_icon_is_unexpected_status() {
        let (base, requests) = spawn_icon_server().await;
        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

        let result = probe.probe(&format!("{base}/missing.ico"), ProbeMethod::Head).await;

        assert!(matches!(result, Err(FetchError::UnexpectedStatus(404))));
        assert_eq!(*requests.lock().unwrap(), vec!["HEAD /missing.ico".to_string()]);
    }

    #[tokio::test]
    async fn test_get_method_skips_head() {
        let (base, requests) = spawn_icon_server().await;
        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

        let result = probe.probe(&format!("{base}/icon.ico"), ProbeMethod::Get).await;

        assert!(matches!(result, Ok(ProbeResult { status_code: Some(200), .. })));
        assert_eq!(*requests.lock().unwrap(), vec!["GET /icon.ico".to_string()]);
    }
}
