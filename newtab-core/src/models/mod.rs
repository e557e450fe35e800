//! Domain models for newtab.
//!
//! ## Submodules
//!
//! - [`domain`] - Lookup keys (Domain, IconSize)
//! - [`cache`] - Cache records (CacheEntry, CacheStats)
//! - [`provider`] - Favicon source identity (ProviderKind, ProviderMetadata)
//! - [`icon`] - The embedded placeholder icon

mod cache;
mod domain;
mod icon;
mod provider;

pub use cache::{CacheEntry, CacheStats, DEFAULT_CACHE_TTL};
pub use domain::{Domain, IconSize};
pub use icon::{DEFAULT_ICON_SVG, default_icon_uri, is_default_icon};
pub use provider::{ProviderKind, ProviderMetadata};
#[cfg(test)]
mod serde_tests;
