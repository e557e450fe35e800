//! Provider registry for managing all provider descriptors.
//!
//! The registry provides static access to all provider configurations
//! and is the central point for looking up providers and assembling the
//! ordered pipeline the resolver runs.

use newtab_core::ProviderKind;
use newtab_fetch::ProviderPipeline;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::descriptor::ProviderDescriptor;
use crate::direct::direct_descriptor;
use crate::duckduckgo::duckduckgo_descriptor;
use crate::error::RegistryError;
use crate::google::{google_descriptor, google_small_descriptor};

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

/// Static storage for CLI name to provider kind mapping.
static CLI_NAME_MAP: OnceLock<HashMap<String, ProviderKind>> = OnceLock::new();

/// Initializes all provider descriptors in priority order.
fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        google_descriptor(),
        duckduckgo_descriptor(),
        direct_descriptor(),
        // Last resort
        google_small_descriptor(),
    ]
}

/// Builds the CLI name to provider kind mapping.
fn build_cli_name_map(descriptors: &[ProviderDescriptor]) -> HashMap<String, ProviderKind> {
    let mut map = HashMap::new();

    for desc in descriptors {
        map.insert(desc.cli.name.to_string(), desc.id);

        for alias in desc.cli.aliases {
            map.insert((*alias).to_string(), desc.id);
        }
    }

    map
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of all provider descriptors.
///
/// The registry is initialized lazily on first access and provides
/// thread-safe access to provider configurations.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors in priority order.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by kind.
    pub fn get(id: ProviderKind) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Returns the CLI name to provider kind mapping.
    pub fn cli_name_map() -> &'static HashMap<String, ProviderKind> {
        CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()))
    }

    /// Looks up a provider by CLI name or alias (case-insensitive).
    pub fn get_by_cli_name(name: &str) -> Option<&'static ProviderDescriptor> {
        let kind = Self::cli_name_map().get(&name.trim().to_ascii_lowercase())?;
        Self::get(*kind)
    }

    /// Returns all enabled-by-default providers.
    pub fn default_enabled() -> Vec<&'static ProviderDescriptor> {
        Self::all()
            .iter()
            .filter(|d| d.metadata.default_enabled)
            .collect()
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all provider kinds in priority order.
    pub fn kinds() -> Vec<ProviderKind> {
        Self::all().iter().map(|d| d.id).collect()
    }

    /// Parses a comma-separated list of provider names.
    ///
    /// Order is kept and repeats are dropped.
    pub fn parse_selection(list: &str) -> Result<Vec<ProviderKind>, RegistryError> {
        let mut kinds = Vec::new();

        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let desc = Self::get_by_cli_name(name)
                .ok_or_else(|| RegistryError::UnknownProvider(name.to_string()))?;
            if !kinds.contains(&desc.id) {
                kinds.push(desc.id);
            }
        }

        if kinds.is_empty() {
            return Err(RegistryError::EmptySelection);
        }
        Ok(kinds)
    }

    /// Builds a pipeline trying `kinds` in the given order.
    pub fn build_pipeline(kinds: &[ProviderKind]) -> ProviderPipeline {
        let sources = kinds
            .iter()
            .filter_map(|kind| Self::get(*kind))
            .map(ProviderDescriptor::build_source)
            .collect::<Vec<_>>();

        debug!(sources = sources.len(), "Built provider pipeline");
        ProviderPipeline::with_sources(sources)
    }

    /// Builds the pipeline of every default-enabled provider.
    pub fn default_pipeline() -> ProviderPipeline {
        let kinds: Vec<_> = Self::default_enabled().iter().map(|d| d.id).collect();
        Self::build_pipeline(&kinds)
    }
}
