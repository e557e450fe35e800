// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # newtab Providers
//!
//! Built-in favicon sources and the registry that orders them.
//!
//! ## Supported Providers
//!
//! | Provider | Candidate URL |
//! |----------|---------------|
//! | Google S2 | `https://www.google.com/s2/favicons?domain={domain}&sz={size}` |
//! | DuckDuckGo | `https://icons.duckduckgo.com/ip3/{domain}.ico` |
//! | Direct | `https://{domain}/favicon.ico` |
//! | Google S2 (16px) | Google S2 pinned to `sz=16` |
//!
//! ## Usage
//!
//! ```ignore
//! use newtab_providers::ProviderRegistry;
//!
//! for desc in ProviderRegistry::all() {
//!     println!("{}: {}", desc.cli_name(), desc.display_name());
//! }
//!
//! let pipeline = ProviderRegistry::default_pipeline();
//! ```

pub mod descriptor;
pub mod error;
pub mod registry;

// Provider modules
pub mod direct;
pub mod duckduckgo;
pub mod google;

// Re-exports
pub use descriptor::{
    CliConfig, FetchPlan, ProviderDescriptor, ProviderDescriptorBuilder, TemplateSource,
};
pub use error::RegistryError;
pub use registry::ProviderRegistry;

pub use direct::direct_descriptor;
pub use duckduckgo::duckduckgo_descriptor;
pub use google::{google_descriptor, google_small_descriptor};
