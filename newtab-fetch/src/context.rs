//! Fetch context providing access to the probe.
//!
//! The context is passed to the pipeline on every run. It owns the probe
//! implementation, so swapping in a scripted probe is a matter of building
//! the context differently.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::probe::{HttpProbe, Probe};
use crate::retry::RetryStrategy;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for probe operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Per-request probe timeout.
    pub timeout: Duration,
    /// Extra attempts on transport failures (0 = probe once).
    pub max_retries: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retries: 0,
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates settings with the given retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Returns the retry strategy implied by these settings.
    pub fn retry_strategy(&self) -> RetryStrategy {
        if self.max_retries == 0 {
            RetryStrategy::no_retry()
        } else {
            RetryStrategy::new(self.max_retries.saturating_add(1))
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to the pipeline.
pub struct FetchContext {
    /// Existence probe for candidate URLs.
    pub probe: Arc<dyn Probe>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context backed by real HTTP with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Creates a context around an existing probe.
    pub fn with_probe(probe: Arc<dyn Probe>) -> Self {
        Self {
            probe,
            settings: FetchSettings::default(),
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the probe timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("probe", &self.probe)
            .field("settings", &self.settings)
            .finish()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Default)]
pub struct FetchContextBuilder {
    probe: Option<Arc<dyn Probe>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probe implementation.
    pub fn probe(mut self, probe: Arc<dyn Probe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.settings.max_retries = retries;
        self
    }

    /// Builds the fetch context.
    ///
    /// Without an explicit probe, an [`HttpProbe`] is created from the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP probe cannot be built.
    pub fn build(self) -> Result<FetchContext, FetchError> {
        let probe: Arc<dyn Probe> = match self.probe {
            Some(probe) => probe,
            None => Arc::new(
                HttpProbe::new(self.settings.timeout)?
                    .with_retry_strategy(self.settings.retry_strategy()),
            ),
        };

        Ok(FetchContext {
            probe,
            settings: self.settings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
