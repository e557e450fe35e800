//! Favicon resolver.
//!
//! Turns a page URL into a displayable icon URL:
//!
//! 1. Fresh cache entry for the domain wins.
//! 2. A domain in the failed set gets the default icon without probing.
//! 3. Otherwise the provider pipeline runs; the first candidate whose probe
//!    succeeds is cached, exhaustion marks the domain failed.
//!
//! The resolver is cheap to clone; clones share the cache.

use newtab_core::{CacheStats, Clock, CoreError, Domain, IconSize, SystemClock, default_icon_uri};
use newtab_fetch::{FetchContext, FetchError, ProviderPipeline};
use newtab_providers::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::favicon_cache::{DEFAULT_CACHE_CAPACITY, FaviconCache, Lookup};
use crate::settings_store::Settings;

// ============================================================================
// Options
// ============================================================================

/// Tunables for cache lifetime and batch pacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// How long a resolved icon stays valid.
    pub ttl: Duration,
    /// Maximum number of cached domains.
    pub capacity: usize,
    /// URLs resolved concurrently per batch group.
    pub batch_size: usize,
    /// Pause between batch groups.
    pub batch_delay: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            ttl: newtab_core::DEFAULT_CACHE_TTL,
            capacity: DEFAULT_CACHE_CAPACITY,
            batch_size: 5,
            batch_delay: Duration::from_millis(100),
        }
    }
}

impl ResolverOptions {
    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the cache capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the batch group size. 0 becomes 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets the pause between batch groups.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves and caches favicons for page URLs.
#[derive(Clone)]
pub struct FaviconResolver {
    cache: Arc<RwLock<FaviconCache>>,
    pipeline: Arc<ProviderPipeline>,
    ctx: Arc<FetchContext>,
    clock: Arc<dyn Clock>,
    pub(crate) options: ResolverOptions,
    notify: Arc<watch::Sender<u64>>,
}

impl FaviconResolver {
    /// Creates a resolver with default options and the system clock.
    pub fn new(pipeline: ProviderPipeline, ctx: FetchContext) -> Self {
        Self::with_options(pipeline, ctx, ResolverOptions::default())
    }

    /// Creates a resolver with the given options and the system clock.
    ///
    /// Options size the cache, so they are fixed for the resolver and its
    /// clones.
    pub fn with_options(
        pipeline: ProviderPipeline,
        ctx: FetchContext,
        mut options: ResolverOptions,
    ) -> Self {
        options.batch_size = options.batch_size.max(1);
        let (notify, _) = watch::channel(0);
        Self {
            cache: Arc::new(RwLock::new(FaviconCache::new(options.ttl, options.capacity))),
            pipeline: Arc::new(pipeline),
            ctx: Arc::new(ctx),
            clock: Arc::new(SystemClock),
            options,
            notify: Arc::new(notify),
        }
    }

    /// Creates a resolver over real HTTP using the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        let ctx = FetchContext::builder()
            .settings(settings.fetch_settings())
            .build()?;
        let pipeline = ProviderRegistry::build_pipeline(&settings.providers);
        Ok(Self::with_options(pipeline, ctx, settings.resolver_options()))
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the active options.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Returns the provider pipeline.
    pub fn pipeline(&self) -> &ProviderPipeline {
        &self.pipeline
    }

    /// Resolves the icon for `page_url`. Never fails.
    ///
    /// Invalid URLs, a zero size and exhausted providers all yield the
    /// embedded default icon.
    pub async fn resolve(&self, page_url: &str, size: u32) -> String {
        match self.try_resolve(page_url, size).await {
            Ok(icon) => icon,
            Err(e) => {
                debug!(url = page_url, error = %e, "Using default icon");
                default_icon_uri().to_string()
            }
        }
    }

    /// Resolves the icon for `page_url`, surfacing input errors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl`/`MissingHost` when no hostname can be extracted
    /// and `InvalidIconSize` for a zero size. Provider failures are not
    /// errors; they produce the default icon.
    pub async fn try_resolve(&self, page_url: &str, size: u32) -> Result<String, CoreError> {
        let domain = Domain::from_page_url(page_url)?;
        let size = IconSize::new(size)?;
        Ok(self.resolve_domain(&domain, size).await)
    }

    /// Resolves the icon for an already-extracted domain.
    pub async fn resolve_domain(&self, domain: &Domain, size: IconSize) -> String {
        let lookup = {
            let mut cache = self.cache.write().await;
            cache.lookup(domain, self.clock.now())
        };

        match lookup {
            Lookup::Hit(icon_url) => return icon_url,
            Lookup::Failed => return default_icon_uri().to_string(),
            Lookup::Expired => self.notify_change(),
            Lookup::Miss => {}
        }

        let outcome = self.pipeline.execute(&self.ctx, domain, size).await;
        let requests = u64::try_from(outcome.attempts_count()).unwrap_or(u64::MAX);

        let icon = {
            let mut cache = self.cache.write().await;
            cache.record_requests(requests);

            match outcome.result {
                Ok(resolved) => {
                    cache.store(domain.clone(), resolved.icon_url.clone(), self.clock.now());
                    info!(domain = %domain, source = %resolved.source_id, "Favicon cached");
                    resolved.icon_url
                }
                Err(FetchError::NoProviders) => {
                    warn!(domain = %domain, "No providers configured");
                    default_icon_uri().to_string()
                }
                Err(e) => {
                    cache.mark_failed(domain.clone());
                    warn!(domain = %domain, error = %e, "No favicon found");
                    default_icon_uri().to_string()
                }
            }
        };

        self.notify_change();
        icon
    }

    /// Empties the cache, the failed set and the request counter.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        info!("Favicon cache cleared");
        self.notify_change();
    }

    /// Forgets one domain so the next lookup probes again.
    ///
    /// Accepts a bare hostname or a page URL. Returns true if the domain was
    /// cached or marked failed.
    pub async fn remove_from_cache(&self, domain: &str) -> bool {
        let domain = Domain::from_page_url(domain).unwrap_or_else(|_| Domain::new(domain));
        let removed = self.cache.write().await.remove(&domain);
        if removed {
            debug!(domain = %domain, "Removed from favicon cache");
            self.notify_change();
        }
        removed
    }

    /// Returns current cache counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Subscribes to cache changes.
    ///
    /// The value is a version counter bumped on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    fn notify_change(&self) {
        self.notify.send_modify(|version| *version += 1);
    }
}

impl std::fmt::Debug for FaviconResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaviconResolver")
            .field("pipeline", &self.pipeline)
            .field("clock", &self.clock)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
