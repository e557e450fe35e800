//! In-memory favicon cache.
//!
//! Holds three pieces of process-lifetime state:
//!
//! - resolved icons per domain, valid for a TTL
//! - the failed-domain set, which only a clear or remove empties
//! - the outbound request counter
//!
//! The cache is synchronous; [`crate::FaviconResolver`] wraps it in a
//! `tokio::sync::RwLock` and never holds that lock across a probe.

use chrono::{DateTime, Utc};
use newtab_core::{CacheEntry, CacheStats, DEFAULT_CACHE_TTL, Domain};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

/// Default maximum number of cached domains.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

// ============================================================================
// Lookup
// ============================================================================

/// What the cache knows about a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A fresh icon URL.
    Hit(String),
    /// Every provider failed for this domain earlier.
    Failed,
    /// An entry existed but had expired; it has been purged.
    Expired,
    /// Nothing known.
    Miss,
}

impl Lookup {
    /// Returns true when providers must be tried.
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Lookup::Expired | Lookup::Miss)
    }
}

// ============================================================================
// Favicon Cache
// ============================================================================

/// TTL cache of resolved icons plus the failed-domain set.
#[derive(Debug, Clone)]
pub struct FaviconCache {
    entries: HashMap<Domain, CacheEntry>,
    failed: HashSet<Domain>,
    total_requests: u64,
    ttl: Duration,
    capacity: usize,
}

impl Default for FaviconCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }
}

impl FaviconCache {
    /// Creates an empty cache. A capacity of 0 is treated as 1.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            failed: HashSet::new(),
            total_requests: 0,
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Returns the entry TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the maximum number of cached domains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Looks up a domain: cache first, then the failed set.
    ///
    /// An expired entry is removed before the failed set is consulted.
    pub fn lookup(&mut self, domain: &Domain, now: DateTime<Utc>) -> Lookup {
        if let Some(entry) = self.entries.get(domain) {
            if entry.is_fresh(now, self.ttl) {
                return Lookup::Hit(entry.icon_url.clone());
            }
            self.entries.remove(domain);
            debug!(domain = %domain, "Purged expired favicon");
            if self.failed.contains(domain) {
                return Lookup::Failed;
            }
            return Lookup::Expired;
        }

        if self.failed.contains(domain) {
            Lookup::Failed
        } else {
            Lookup::Miss
        }
    }

    /// Returns the stored entry for a domain, fresh or not.
    pub fn entry(&self, domain: &Domain) -> Option<&CacheEntry> {
        self.entries.get(domain)
    }

    /// Returns true if the domain is in the failed set.
    pub fn is_failed(&self, domain: &Domain) -> bool {
        self.failed.contains(domain)
    }

    /// Stores a resolved icon and clears any failure mark.
    ///
    /// Returns the domain evicted to make room, if any.
    pub fn store(&mut self, domain: Domain, icon_url: impl Into<String>, now: DateTime<Utc>) -> Option<Domain> {
        self.failed.remove(&domain);

        let evicted = if !self.entries.contains_key(&domain) && self.entries.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        self.entries.insert(domain, CacheEntry::new(icon_url, now));
        evicted
    }

    /// Adds a domain to the failed set.
    pub fn mark_failed(&mut self, domain: Domain) {
        self.failed.insert(domain);
    }

    /// Adds to the outbound request counter.
    pub fn record_requests(&mut self, count: u64) {
        self.total_requests = self.total_requests.saturating_add(count);
    }

    /// Forgets a domain entirely. Returns true if anything was removed.
    pub fn remove(&mut self, domain: &Domain) -> bool {
        let had_entry = self.entries.remove(domain).is_some();
        let was_failed = self.failed.remove(domain);
        had_entry || was_failed
    }

    /// Drops every expired entry. Returns how many were dropped.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh(now, ttl));
        before - self.entries.len()
    }

    /// Empties the cache, the failed set and the request counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.failed.clear();
        self.total_requests = 0;
    }

    /// Returns current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached_domains: self.entries.len(),
            failed_domains: self.failed.len(),
            total_requests: self.total_requests,
        }
    }

    fn evict_oldest(&mut self) -> Option<Domain> {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(domain, _)| domain.clone())?;

        self.entries.remove(&oldest);
        debug!(domain = %oldest, "Evicted oldest favicon");
        Some(oldest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn hours(n: i64) -> chrono::Duration {
        chrono::Duration::hours(n)
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = FaviconCache::default();
        let domain = Domain::new("example.com");

        assert_eq!(cache.lookup(&domain, t0()), Lookup::Miss);
        cache.store(domain.clone(), "https://icon/e", t0());
        assert_eq!(
            cache.lookup(&domain, t0() + hours(1)),
            Lookup::Hit("https://icon/e".to_string())
        );
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let mut cache = FaviconCache::default();
        let domain = Domain::new("example.com");
        cache.store(domain.clone(), "https://icon/e", t0());

        let almost = t0() + hours(24) - chrono::Duration::seconds(1);
        assert!(matches!(cache.lookup(&domain, almost), Lookup::Hit(_)));

        assert_eq!(cache.lookup(&domain, t0() + hours(24)), Lookup::Expired);
        assert!(cache.entry(&domain).is_none());
        assert_eq!(cache.lookup(&domain, t0() + hours(24)), Lookup::Miss);
    }

    #[test]
    fn test_failed_short_circuit() {
        let mut cache = FaviconCache::default();
        let domain = Domain::new("nothing.invalid");
        cache.mark_failed(domain.clone());

        assert_eq!(cache.lookup(&domain, t0()), Lookup::Failed);
        assert!(!Lookup::Failed.needs_fetch());
    }

    #[test]
    fn test_store_clears_failure() {
        let mut cache = FaviconCache::default();
        let domain = Domain::new("flaky.com");
        cache.mark_failed(domain.clone());
        cache.store(domain.clone(), "https://icon/f", t0());

        assert!(!cache.is_failed(&domain));
        assert_eq!(cache.stats().failed_domains, 0);
    }

    #[test]
    fn test_store_overwrites() {
        let mut cache = FaviconCache::default();
        let domain = Domain::new("example.com");
        cache.store(domain.clone(), "https://old", t0());
        cache.store(domain.clone(), "https://new", t0() + hours(2));

        let entry = cache.entry(&domain).unwrap();
        assert_eq!(entry.icon_url, "https://new");
        assert_eq!(entry.stored_at, t0() + hours(2));
        assert_eq!(cache.stats().cached_domains, 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = FaviconCache::new(DEFAULT_CACHE_TTL, 2);
        cache.store(Domain::new("a.com"), "https://a", t0());
        cache.store(Domain::new("b.com"), "https://b", t0() + hours(1));

        let evicted = cache.store(Domain::new("c.com"), "https://c", t0() + hours(2));
        assert_eq!(evicted, Some(Domain::new("a.com")));
        assert_eq!(cache.stats().cached_domains, 2);

        // Overwriting an existing domain never evicts.
        assert_eq!(cache.store(Domain::new("b.com"), "https://b2", t0() + hours(3)), None);
    }

    #[test]
    fn test_remove() {
        let mut cache = FaviconCache::default();
        cache.store(Domain::new("a.com"), "https://a", t0());
        cache.mark_failed(Domain::new("b.com"));

        assert!(cache.remove(&Domain::new("a.com")));
        assert!(cache.remove(&Domain::new("b.com")));
        assert!(!cache.remove(&Domain::new("c.com")));
        assert!(cache.stats().is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cache = FaviconCache::default();
        cache.store(Domain::new("a.com"), "https://a", t0());
        cache.mark_failed(Domain::new("b.com"));
        cache.record_requests(7);
        assert_eq!(
            cache.stats(),
            CacheStats {
                cached_domains: 1,
                failed_domains: 1,
                total_requests: 7,
            }
        );

        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_purge_expired() {
        let mut cache = FaviconCache::new(Duration::from_secs(3600), 10);
        cache.store(Domain::new("old.com"), "https://old", t0());
        cache.store(Domain::new("new.com"), "https://new", t0() + hours(2));

        assert_eq!(cache.purge_expired(t0() + hours(2)), 1);
        assert!(cache.entry(&Domain::new("new.com")).is_some());
    }
}
