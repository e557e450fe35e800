//! Cache records and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time a resolved icon stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// ============================================================================
// Cache Entry
// ============================================================================

/// A resolved icon for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// The winning provider URL.
    pub icon_url: String,
    /// When the icon was resolved.
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates an entry stamped at `stored_at`.
    pub fn new(icon_url: impl Into<String>, stored_at: DateTime<Utc>) -> Self {
        Self {
            icon_url: icon_url.into(),
            stored_at,
        }
    }

    /// Returns how long ago the entry was stored.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.stored_at)
    }

    /// Returns true while the entry is younger than `ttl`.
    ///
    /// An entry stamped in the future (clock stepped backwards) counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        self.age(now) < ttl
    }
}

// ============================================================================
// Cache Stats
// ============================================================================

/// Counters reported by the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Domains with a stored icon (fresh or not yet purged).
    pub cached_domains: usize,
    /// Domains that exhausted every provider.
    pub failed_domains: usize,
    /// Outbound probe requests since the last clear.
    pub total_requests: u64,
}

impl CacheStats {
    /// Returns true when nothing has been cached, failed or requested.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
