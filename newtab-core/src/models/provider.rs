//! Provider-related types.
//!
//! - [`ProviderKind`] - Enum of built-in favicon sources
//! - [`ProviderMetadata`] - Display info for a source

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Provider Kind
// ============================================================================

/// Built-in favicon sources, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google's S2 favicon service at the requested size.
    Google,
    /// DuckDuckGo's icon service.
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    /// The site's own `/favicon.ico`.
    Direct,
    /// Google's S2 service pinned to 16px, tried last.
    GoogleSmall,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google S2",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Direct => "Direct favicon.ico",
            Self::GoogleSmall => "Google S2 (16px)",
        }
    }

    /// Returns all provider kinds in default priority order.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::Google,
            Self::DuckDuckGo,
            Self::Direct,
            Self::GoogleSmall,
        ]
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::DuckDuckGo => "duckduckgo",
            Self::Direct => "direct",
            Self::GoogleSmall => "google_small",
        }
    }

    /// Looks up a provider by CLI name.
    pub fn from_cli_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.cli_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Provider Metadata
// ============================================================================

/// Static display information about a favicon source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Provider identifier.
    pub id: ProviderKind,
    /// Human-readable name.
    pub display_name: String,
    /// One-line description of what the source does.
    pub description: String,
    /// Homepage of the service, if it is a third party.
    pub homepage: Option<String>,
    /// Whether the source is part of the default provider list.
    pub default_enabled: bool,
}

impl ProviderMetadata {
    /// Creates metadata with defaults derived from the kind.
    pub fn new(id: ProviderKind) -> Self {
        Self {
            id,
            display_name: id.display_name().to_string(),
            description: String::new(),
            homepage: None,
            default_enabled: true,
        }
    }
}
