//! Batch favicon resolution.
//!
//! URLs are split into groups of `batch_size`. Each group resolves
//! concurrently; groups run one after another with `batch_delay` between
//! them so a page full of bookmarks does not hit the icon services at once.

use futures::future::join_all;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::resolver::FaviconResolver;

// ============================================================================
// Batch Outcome
// ============================================================================

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Icon per input URL. Repeated inputs share one key.
    pub icons: HashMap<String, String>,
    /// Number of groups resolved.
    pub groups: usize,
    /// Number of pauses taken between groups.
    pub pauses: usize,
    /// Wall time for the whole batch.
    pub duration: Duration,
}

impl BatchOutcome {
    /// Number of distinct input URLs.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Returns true if the batch had no input.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Number of URLs that fell back to the default icon.
    pub fn default_count(&self) -> usize {
        self.icons
            .values()
            .filter(|icon| newtab_core::is_default_icon(icon))
            .count()
    }
}

// ============================================================================
// Batch Operations
// ============================================================================

impl FaviconResolver {
    /// Resolves many URLs with bounded concurrency.
    ///
    /// Every input URL gets exactly one entry; failures map to the default
    /// icon.
    pub async fn resolve_batch(&self, urls: &[String], size: u32) -> HashMap<String, String> {
        self.resolve_batch_report(urls, size).await.icons
    }

    /// Like [`resolve_batch`](Self::resolve_batch), also reporting pacing.
    pub async fn resolve_batch_report(&self, urls: &[String], size: u32) -> BatchOutcome {
        let start = Instant::now();
        let batch_size = self.options.batch_size.max(1);
        let delay = self.options.batch_delay;

        let mut outcome = BatchOutcome {
            icons: HashMap::with_capacity(urls.len()),
            ..Default::default()
        };

        let mut groups = urls.chunks(batch_size).peekable();
        while let Some(group) = groups.next() {
            outcome.groups += 1;
            debug!(group = outcome.groups, size = group.len(), "Resolving batch group");

            let icons = join_all(group.iter().map(|url| async move {
                let icon = self.resolve(url, size).await;
                (url.clone(), icon)
            }))
            .await;
            outcome.icons.extend(icons);

            if groups.peek().is_some() {
                outcome.pauses += 1;
                tokio::time::sleep(delay).await;
            }
        }

        outcome.duration = start.elapsed();
        info!(
            urls = urls.len(),
            groups = outcome.groups,
            defaults = outcome.default_count(),
            duration_ms = outcome.duration.as_millis(),
            "Batch resolved"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverOptions;
    use crate::test_support::{CountingProbe, resolver_with, resolver_with_options};
    use newtab_core::is_default_icon;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://site{i}.com/page")).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_groups_and_pauses() {
        let probe = CountingProbe::accepting(&["www.google.com"]);
        let resolver = resolver_with(probe.clone());

        let outcome = resolver.resolve_batch_report(&urls(12), 32).await;

        assert_eq!(outcome.len(), 12);
        assert_eq!(outcome.groups, 3);
        assert_eq!(outcome.pauses, 2);
        assert!(outcome.duration >= Duration::from_millis(200));
        assert_eq!(probe.calls(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_bounded_by_batch_size() {
        let probe = CountingProbe::with_latency(&["www.google.com"], Duration::from_millis(50));
        let resolver = resolver_with(probe.clone());

        resolver.resolve_batch(&urls(12), 32).await;

        assert_eq!(probe.peak(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_group_never_pauses() {
        let probe = CountingProbe::accepting(&["www.google.com"]);
        let resolver = resolver_with(probe);

        let outcome = resolver.resolve_batch_report(&urls(5), 32).await;
        assert_eq!(outcome.groups, 1);
        assert_eq!(outcome.pauses, 0);
        assert!(outcome.duration < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicates_resolved_independently() {
        let probe = CountingProbe::with_latency(&["www.google.com"], Duration::from_millis(10));
        let resolver = resolver_with(probe.clone());
        let input = vec!["https://dup.com".to_string(), "https://dup.com".to_string()];

        let icons = resolver.resolve_batch(&input, 32).await;

        assert_eq!(icons.len(), 1);
        assert_eq!(probe.calls(), 2);
        assert_eq!(resolver.cache_stats().await.cached_domains, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let probe = CountingProbe::accepting(&[]);
        let resolver = resolver_with(probe.clone());

        let outcome = resolver.resolve_batch_report(&[], 32).await;
        assert!(outcome.is_empty());
        assert_eq!(outcome.groups, 0);
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_and_bad_urls_map_to_default() {
        let probe = CountingProbe::accepting(&["good.com"]);
        let resolver = resolver_with(probe);
        let input = vec![
            "https://good.com".to_string(),
            "https://bad.com".to_string(),
            "::not a url::".to_string(),
        ];

        let icons = resolver.resolve_batch(&input, 32).await;

        assert_eq!(icons.len(), 3);
        assert_eq!(icons["https://good.com"], "https://good.com/favicon.ico");
        assert!(is_default_icon(&icons["https://bad.com"]));
        assert!(is_default_icon(&icons["::not a url::"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_batch_size_runs_one_at_a_time() {
        let probe = CountingProbe::with_latency(&["www.google.com"], Duration::from_millis(10));
        let resolver = resolver_with_options(
            probe.clone(),
            ResolverOptions {
                batch_size: 0,
                ..Default::default()
            },
        );

        let outcome = resolver.resolve_batch_report(&urls(3), 32).await;
        assert_eq!(outcome.groups, 3);
        assert_eq!(outcome.pauses, 2);
        assert_eq!(probe.peak(), 1);
    }
}
