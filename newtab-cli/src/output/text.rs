//! Text output formatting with colors.

use newtab_core::{CacheStats, is_default_icon};
use newtab_fetch::ProbeAttempt;
use newtab_providers::ProviderDescriptor;
use newtab_store::{BatchOutcome, Settings};
use std::time::Duration;

use super::IconReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

const DEFAULT_ICON_LABEL: &str = "(default icon)";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats `url -> icon`, abbreviating the embedded default icon.
    pub fn format_icon(&self, report: &IconReport) -> String {
        let icon = if is_default_icon(&report.icon) {
            self.dim(DEFAULT_ICON_LABEL)
        } else {
            self.cyan(&report.icon)
        };

        match &report.error {
            Some(error) => format!("{} -> {} {}", report.url, icon, self.red(&format!("[{error}]"))),
            None => format!("{} -> {}", report.url, icon),
        }
    }

    /// Formats cache counters.
    pub fn format_stats(&self, stats: &CacheStats) -> String {
        format!(
            "{}  cached: {}  failed: {}  requests: {}",
            self.bold("Cache"),
            stats.cached_domains,
            stats.failed_domains,
            stats.total_requests
        )
    }

    /// Formats the one-line batch summary.
    pub fn format_batch_summary(&self, outcome: &BatchOutcome, inputs: usize) -> String {
        format!(
            "{} URLs in {} groups ({} pauses), {} defaulted, {}",
            inputs,
            outcome.groups,
            outcome.pauses,
            outcome.default_count(),
            format_duration(outcome.duration)
        )
    }

    /// Formats the check command header.
    pub fn format_check_header(&self, domain: &str, size: u32, survey: bool) -> String {
        let mode = if survey { "all providers" } else { "first success" };
        format!("{} ({}px, {})", self.bold(domain), size, mode)
    }

    /// Formats one probe attempt.
    pub fn format_attempt(&self, position: usize, attempt: &ProbeAttempt) -> String {
        let status = if attempt.success {
            let code = attempt
                .status_code
                .map_or_else(|| "ok".to_string(), |c| c.to_string());
            self.green(&format!("✓ {code}"))
        } else {
            let error = attempt.error.as_deref().unwrap_or("failed");
            self.red(&format!("✗ {error}"))
        };

        format!(
            "{:>2}. {:<13} {} {}\n    {}",
            position + 1,
            attempt.source_id,
            status,
            self.dim(&format_duration(attempt.duration)),
            attempt.url
        )
    }

    /// Formats the check result line.
    pub fn format_check_result(&self, icon: Option<&str>, total: Duration) -> String {
        match icon {
            Some(icon) => format!("{} {} ({})", self.green("Accepted:"), icon, format_duration(total)),
            None => format!(
                "{} every provider failed, {} would be used ({})",
                self.red("No icon:"),
                DEFAULT_ICON_LABEL,
                format_duration(total)
            ),
        }
    }

    /// Formats the provider list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{:<4} {:<13} {:<20} {:<8} {}",
            self.bold("#"),
            self.bold("CLI"),
            self.bold("Provider"),
            self.bold("Enabled"),
            self.bold("Candidate URL")
        )
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, position: usize, desc: &ProviderDescriptor, enabled: Option<usize>) -> String {
        let enabled_str = match enabled {
            Some(order) => self.green(&format!("✓ {}", order + 1)),
            None => self.dim("−"),
        };

        let mut template = desc.fetch_plan.template.pattern().to_string();
        if let Some(size) = desc.fetch_plan.fixed_size {
            template = template.replace("{size}", &size.pixels().to_string());
        }

        format!(
            "{:<4} {:<13} {:<20} {:<8} {}",
            position + 1,
            desc.cli_name(),
            desc.display_name(),
            enabled_str,
            self.dim(&template)
        )
    }

    /// Formats settings as `key = value` lines.
    pub fn format_settings(&self, settings: &Settings) -> String {
        let providers: Vec<&str> = settings.providers.iter().map(|k| k.cli_name()).collect();

        let rows = [
            ("icon_size", settings.icon_size.to_string()),
            ("cache_ttl_secs", settings.cache_ttl_secs.to_string()),
            ("cache_capacity", settings.cache_capacity.to_string()),
            ("batch_size", settings.batch_size.to_string()),
            ("batch_delay_ms", settings.batch_delay_ms.to_string()),
            ("probe_timeout_secs", settings.probe_timeout_secs.to_string()),
            ("probe_retries", settings.probe_retries.to_string()),
            ("providers", providers.join(",")),
            ("log_level", settings.log_level.to_string()),
        ];

        rows.iter()
            .map(|(key, value)| format!("{:<20} {}", self.bold(key), value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Formats a duration as `45ms` or `1.2s`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(45)), "45ms");
        assert_eq!(format_duration(Duration::from_millis(1300)), "1.3s");
    }

    #[test]
    fn test_paint_respects_color_flag() {
        assert_eq!(TextFormatter::new(false).red("x"), "x");
        assert_eq!(TextFormatter::new(true).red("x"), format!("{RED}x{RESET}"));
    }

    #[test]
    fn test_format_stats() {
        let formatter = TextFormatter::new(false);
        let stats = CacheStats {
            cached_domains: 3,
            failed_domains: 1,
            total_requests: 9,
        };
        assert_eq!(
            formatter.format_stats(&stats),
            "Cache  cached: 3  failed: 1  requests: 9"
        );
    }
}
