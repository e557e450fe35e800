//! Provider pipeline for trying icon sources in order.
//!
//! The pipeline takes an ordered list of sources and probes their candidate
//! URLs one at a time until a probe succeeds. Probe failures are routine
//! (dead domains, missing icons, timeouts) and never stop the loop.

use futures::future::join_all;
use newtab_core::{Domain, IconSize, ProviderKind};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::source::{IconSource, ResolvedIcon, SourceInfo};

// ============================================================================
// Probe Attempt
// ============================================================================

/// Record of a single probe attempt.
#[derive(Debug, Clone)]
pub struct ProbeAttempt {
    /// The source that was attempted.
    pub source_id: String,
    /// The kind of source.
    pub kind: ProviderKind,
    /// The candidate URL that was probed.
    pub url: String,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Status code reported by the probe, if any.
    pub status_code: Option<u16>,
    /// Error if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl ProbeAttempt {
    /// Creates a successful attempt record.
    pub fn success(
        source: &dyn IconSource,
        url: impl Into<String>,
        status_code: Option<u16>,
        duration: Duration,
    ) -> Self {
        Self {
            source_id: source.id().to_string(),
            kind: source.kind(),
            url: url.into(),
            success: true,
            status_code,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        source: &dyn IconSource,
        url: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            source_id: source.id().to_string(),
            kind: source.kind(),
            url: url.into(),
            success: false,
            status_code: None,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Resolve Outcome
// ============================================================================

/// The outcome of a pipeline execution.
#[derive(Debug)]
pub struct ResolveOutcome {
    /// The accepted icon, or the final error.
    pub result: Result<ResolvedIcon, FetchError>,
    /// All attempts made.
    pub attempts: Vec<ProbeAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl ResolveOutcome {
    /// Returns true if a source succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of sources that were probed.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the successful source ID, if any.
    pub fn successful_source(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|r| r.source_id.as_str())
    }

    /// Returns the accepted icon URL, if any.
    pub fn icon_url(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|r| r.icon_url.as_str())
    }

    /// Returns all errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

// ============================================================================
// Provider Pipeline
// ============================================================================

/// An ordered list of icon sources.
///
/// Order is significant: sources are probed exactly in the order given.
pub struct ProviderPipeline {
    sources: Vec<Box<dyn IconSource>>,
}

impl ProviderPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Creates a pipeline with the given sources, keeping their order.
    pub fn with_sources(sources: Vec<Box<dyn IconSource>>) -> Self {
        Self { sources }
    }

    /// Appends a source to the end of the pipeline.
    pub fn add_source(&mut self, source: Box<dyn IconSource>) {
        self.sources.push(source);
    }

    /// Returns the number of sources in the pipeline.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns information about all sources.
    pub fn source_info(&self) -> Vec<SourceInfo> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, s)| SourceInfo::from_source(s.as_ref(), i + 1))
            .collect()
    }

    /// Probes sources in order until one succeeds.
    #[instrument(skip(self, ctx, domain, size), fields(domain = %domain, size = size.pixels(), sources = self.sources.len()))]
    pub async fn execute(&self, ctx: &FetchContext, domain: &Domain, size: IconSize) -> ResolveOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        if self.sources.is_empty() {
            return ResolveOutcome {
                result: Err(FetchError::NoProviders),
                attempts,
                duration: start.elapsed(),
            };
        }

        for source in &self.sources {
            let source_id = source.id();
            let url = source.candidate_url(domain, size);
            let attempt_start = Instant::now();

            debug!(source = %source_id, url = %url, "Probing candidate");

            match ctx.probe.probe(&url, source.probe_method()).await {
                Ok(probe) => {
                    let duration = attempt_start.elapsed();
                    info!(
                        source = %source_id,
                        duration = ?duration,
                        "Icon source succeeded"
                    );

                    attempts.push(ProbeAttempt::success(
                        source.as_ref(),
                        url.clone(),
                        probe.status_code,
                        duration,
                    ));

                    return ResolveOutcome {
                        result: Ok(ResolvedIcon::new(url, source_id, source.kind())),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    debug!(
                        source = %source_id,
                        error = %error,
                        duration = ?duration,
                        "Icon source failed"
                    );

                    attempts.push(ProbeAttempt::failure(
                        source.as_ref(),
                        url,
                        error.to_string(),
                        duration,
                    ));
                }
            }
        }

        debug!("All icon sources failed");
        ResolveOutcome {
            result: Err(FetchError::AllProvidersFailed),
            attempts,
            duration: start.elapsed(),
        }
    }

    /// Probes every source concurrently and reports each result.
    ///
    /// Diagnostic only: unlike [`execute`](Self::execute) it does not stop
    /// at the first success.
    pub async fn survey(&self, ctx: &FetchContext, domain: &Domain, size: IconSize) -> Vec<ProbeAttempt> {
        let futures = self.sources.iter().map(|source| async move {
            let url = source.candidate_url(domain, size);
            let attempt_start = Instant::now();

            match ctx.probe.probe(&url, source.probe_method()).await {
                Ok(probe) => ProbeAttempt::success(
                    source.as_ref(),
                    url,
                    probe.status_code,
                    attempt_start.elapsed(),
                ),
                Err(error) => ProbeAttempt::failure(
                    source.as_ref(),
                    url,
                    error.to_string(),
                    attempt_start.elapsed(),
                ),
            }
        });

        join_all(futures).await
    }
}

impl Default for ProviderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.id()))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
