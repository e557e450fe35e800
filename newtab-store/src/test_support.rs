//! Shared fixtures for unit tests.

use async_trait::async_trait;
use newtab_fetch::{FetchContext, FetchError, Probe, ProbeMethod, ProbeResult};
use newtab_providers::ProviderRegistry;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::resolver::{FaviconResolver, ResolverOptions};

/// Accepts URLs whose host is listed, counts calls and tracks peak concurrency.
#[derive(Debug, Default)]
pub(crate) struct CountingProbe {
    good: HashSet<String>,
    latency: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl CountingProbe {
    pub(crate) fn accepting(hosts: &[&str]) -> Arc<Self> {
        Self::with_latency(hosts, Duration::ZERO)
    }

    pub(crate) fn with_latency(hosts: &[&str], latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            good: hosts.iter().map(|h| (*h).to_string()).collect(),
            latency,
            ..Default::default()
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Probe for CountingProbe {
    async fn probe(&self, url: &str, _method: ProbeMethod) -> Result<ProbeResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let host = url::Url::parse(url).unwrap().host_str().unwrap().to_string();
        if self.good.contains(&host) {
            Ok(ProbeResult::new(Some(200), self.latency))
        } else {
            Err(FetchError::UnexpectedStatus(404))
        }
    }
}

/// Resolver over the default provider list and the given probe.
pub(crate) fn resolver_with(probe: Arc<CountingProbe>) -> FaviconResolver {
    resolver_with_options(probe, ResolverOptions::default())
}

/// Like [`resolver_with`], with custom options.
pub(crate) fn resolver_with_options(
    probe: Arc<CountingProbe>,
    options: ResolverOptions,
) -> FaviconResolver {
    FaviconResolver::with_options(
        ProviderRegistry::default_pipeline(),
        FetchContext::with_probe(probe),
        options,
    )
}
