// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `newtab` Core
//!
//! Core types shared by every `newtab` crate:
//!
//! - Domain models (lookup keys, cache records, provider identity)
//! - The embedded placeholder icon
//! - Error types
//! - The [`Clock`] seam used for cache expiry
//!
//! ## Key Types
//!
//! - [`Domain`] - Hostname used as the cache key
//! - [`IconSize`] - Requested pixel size
//! - [`CacheEntry`] - A resolved icon with its timestamp
//! - [`CacheStats`] - Counters exposed by the resolver
//! - [`ProviderKind`] - Built-in favicon sources
//! - [`default_icon_uri`] - Placeholder returned when nothing resolves

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Lookup keys
    Domain,
    IconSize,
    // Cache
    CacheEntry,
    CacheStats,
    DEFAULT_CACHE_TTL,
    // Providers
    ProviderKind,
    ProviderMetadata,
    // Placeholder icon
    DEFAULT_ICON_SVG,
    default_icon_uri,
    is_default_icon,
};

// Re-export traits
pub use traits::{Clock, ManualClock, SystemClock};
