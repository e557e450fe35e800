// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # newtab Store
//!
//! Favicon state for the newtab dashboard.
//!
//! This crate provides:
//!
//! - **FaviconResolver**: page URL to icon URL, with a TTL cache and a
//!   failed-domain set
//! - **Batch resolution**: many URLs in paced, bounded-concurrency groups
//! - **SettingsStore**: User preferences with persistence
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use newtab_store::{FaviconResolver, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await?.get().await;
//! let resolver = FaviconResolver::from_settings(&settings)?;
//!
//! let icon = resolver.resolve("https://github.com/rust-lang", 32).await;
//!
//! let mut rx = resolver.subscribe();
//! while rx.changed().await.is_ok() {
//!     println!("Icons changed");
//! }
//! ```

pub mod batch;
pub mod error;
pub mod favicon_cache;
pub mod persistence;
pub mod resolver;
pub mod settings_store;

pub use batch::BatchOutcome;
pub use error::StoreError;
pub use favicon_cache::{DEFAULT_CACHE_CAPACITY, FaviconCache, Lookup};
pub use persistence::{
    default_config_dir, default_settings_path, load_json, load_json_or_default, save_json,
};
pub use resolver::{FaviconResolver, ResolverOptions};
pub use settings_store::{LogLevel, Settings, SettingsStore};

#[cfg(test)]
mod persistence_tests;
#[cfg(test)]
mod test_support;
