//! JSON output formatting.

use anyhow::Result;
use newtab_core::{CacheStats, is_default_icon};
use newtab_fetch::ProbeAttempt;
use newtab_providers::ProviderDescriptor;
use newtab_store::BatchOutcome;
use serde::Serialize;
use std::time::Duration;

use super::IconReport;

// ============================================================================
// Output Types
// ============================================================================

/// One resolved URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconOutput {
    pub url: String,
    pub icon: String,
    pub is_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolve command output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOutput {
    pub icons: Vec<IconOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CacheStats>,
}

/// Batch command output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub icons: Vec<IconOutput>,
    pub groups: usize,
    pub pauses: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CacheStats>,
}

/// One probe attempt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutput {
    pub provider: String,
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Check command output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub domain: String,
    pub size: u32,
    pub survey: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub attempts: Vec<AttemptOutput>,
    pub duration_ms: u64,
}

/// Provider info for listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub aliases: Vec<String>,
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_size: Option<u32>,
    pub probe_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Position in the configured order, if enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_position: Option<usize>,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats resolve results.
    pub fn format_resolve(&self, reports: &[IconReport], stats: Option<CacheStats>) -> Result<String> {
        self.format(&ResolveOutput {
            icons: reports.iter().map(icon_to_output).collect(),
            stats,
        })
    }

    /// Formats a batch outcome.
    pub fn format_batch(
        &self,
        reports: &[IconReport],
        outcome: &BatchOutcome,
        stats: Option<CacheStats>,
    ) -> Result<String> {
        self.format(&BatchOutput {
            icons: reports.iter().map(icon_to_output).collect(),
            groups: outcome.groups,
            pauses: outcome.pauses,
            duration_ms: millis(outcome.duration),
            stats,
        })
    }

    /// Formats check results.
    pub fn format_check(
        &self,
        domain: &str,
        size: u32,
        survey: bool,
        icon: Option<&str>,
        attempts: &[ProbeAttempt],
        total: Duration,
    ) -> Result<String> {
        self.format(&CheckOutput {
            domain: domain.to_string(),
            size,
            survey,
            icon: icon.map(str::to_string),
            attempts: attempts.iter().map(attempt_to_output).collect(),
            duration_ms: millis(total),
        })
    }

    /// Formats provider list.
    pub fn format_providers(
        &self,
        providers: &[ProviderDescriptor],
        enabled_position: impl Fn(&ProviderDescriptor) -> Option<usize>,
    ) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput> = providers
            .iter()
            .map(|desc| ProviderInfoOutput {
                id: desc.cli_name().to_string(),
                display_name: desc.display_name().to_string(),
                description: desc.metadata.description.clone(),
                aliases: desc.cli.aliases.iter().map(|a| (*a).to_string()).collect(),
                template: desc.fetch_plan.template.pattern().to_string(),
                fixed_size: desc.fetch_plan.fixed_size.map(newtab_core::IconSize::pixels),
                probe_method: desc.fetch_plan.probe_method.to_string(),
                homepage: desc.metadata.homepage.clone(),
                enabled_position: enabled_position(desc),
            })
            .collect();

        self.format(&outputs)
    }
}

fn icon_to_output(report: &IconReport) -> IconOutput {
    IconOutput {
        url: report.url.clone(),
        icon: report.icon.clone(),
        is_default: is_default_icon(&report.icon),
        error: report.error.clone(),
    }
}

fn attempt_to_output(attempt: &ProbeAttempt) -> AttemptOutput {
    AttemptOutput {
        provider: attempt.source_id.clone(),
        url: attempt.url.clone(),
        success: attempt.success,
        status_code: attempt.status_code,
        error: attempt.error.clone(),
        duration_ms: millis(attempt.duration),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
