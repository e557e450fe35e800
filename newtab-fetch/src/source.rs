//! Icon source trait and types.
//!
//! A source turns a domain into one candidate icon URL. The pipeline asks
//! each configured source in turn and probes what it returns.

use newtab_core::{Domain, IconSize, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::probe::ProbeMethod;

// ============================================================================
// URL Template
// ============================================================================

/// A candidate URL pattern with `{domain}` and `{size}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Placeholder replaced by the hostname.
    pub const DOMAIN: &'static str = "{domain}";
    /// Placeholder replaced by the pixel size.
    pub const SIZE: &'static str = "{size}";

    /// Creates a template.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Returns the raw pattern.
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Returns true if the pattern mentions the size placeholder.
    pub fn uses_size(&self) -> bool {
        self.0.contains(Self::SIZE)
    }

    /// Fills in the placeholders.
    pub fn render(&self, domain: &Domain, size: IconSize) -> String {
        self.0
            .replace(Self::DOMAIN, domain.as_str())
            .replace(Self::SIZE, &size.pixels().to_string())
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Resolved Icon
// ============================================================================

/// The outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIcon {
    /// The accepted candidate URL.
    pub icon_url: String,
    /// The source that produced it.
    pub source_id: String,
    /// The kind of source.
    pub kind: ProviderKind,
}

impl ResolvedIcon {
    /// Creates a resolved icon.
    pub fn new(icon_url: impl Into<String>, source_id: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            icon_url: icon_url.into(),
            source_id: source_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Icon Source Trait
// ============================================================================

/// One way of producing a candidate favicon URL for a domain.
///
/// ## Implementing a Source
///
/// ```ignore
/// struct DirectSource;
///
/// impl IconSource for DirectSource {
///     fn id(&self) -> &str {
///         "direct"
///     }
///
///     fn kind(&self) -> ProviderKind {
///         ProviderKind::Direct
///     }
///
///     fn candidate_url(&self, domain: &Domain, _size: IconSize) -> String {
///         format!("https://{domain}/favicon.ico")
///     }
/// }
/// ```
pub trait IconSource: Send + Sync {
    /// Unique identifier for this source (e.g., "google", "google_small").
    fn id(&self) -> &str;

    /// The kind of source.
    fn kind(&self) -> ProviderKind;

    /// Human-readable name for this source.
    fn display_name(&self) -> String {
        format!("{} ({})", self.id(), self.kind().display_name())
    }

    /// Builds the candidate URL for `domain` at `size`.
    fn candidate_url(&self, domain: &Domain, size: IconSize) -> String;

    /// How the candidate should be probed.
    fn probe_method(&self) -> ProbeMethod {
        ProbeMethod::Head
    }
}

// ============================================================================
// Source Info
// ============================================================================

/// Information about a source (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source ID.
    pub id: String,
    /// Source kind.
    pub kind: ProviderKind,
    /// Probe method.
    pub probe_method: ProbeMethod,
    /// Position in the pipeline, starting at 1.
    pub position: usize,
}

impl SourceInfo {
    /// Creates source info from a source implementation.
    pub fn from_source(source: &dyn IconSource, position: usize) -> Self {
        Self {
            id: source.id().to_string(),
            kind: source.kind(),
            probe_method: source.probe_method(),
            position,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
