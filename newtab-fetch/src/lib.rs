// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # newtab Fetch
//!
//! Network side of favicon resolution.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing and scheme checks
//!
//! ## Probing
//!
//! - [`probe::Probe`] - Trait for existence checks on candidate URLs
//! - [`probe::HttpProbe`] - `HEAD`/`GET` implementation with a short timeout
//! - [`retry::RetryStrategy`] - Optional retries on transport failures
//!
//! ## Provider Pipeline
//!
//! - [`source::IconSource`] - Trait for candidate URL producers
//! - [`pipeline::ProviderPipeline`] - Probes sources in order
//! - [`context::FetchContext`] - Carries the probe and settings
//!
//! ## Example
//!
//! ```ignore
//! use newtab_core::{Domain, IconSize};
//! use newtab_fetch::{FetchContext, ProviderPipeline};
//!
//! let ctx = FetchContext::new()?;
//! let pipeline = ProviderPipeline::with_sources(sources);
//!
//! let outcome = pipeline
//!     .execute(&ctx, &Domain::new("example.com"), IconSize::DEFAULT)
//!     .await;
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod probe;
pub mod retry;
pub mod source;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::http::{HttpClient, ResponseExt};

// Probing
pub use probe::{HttpProbe, Probe, ProbeMethod, ProbeResult, classify_status};
pub use retry::RetryStrategy;

// Sources & Pipeline
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use pipeline::{ProbeAttempt, ProviderPipeline, ResolveOutcome};
pub use source::{IconSource, ResolvedIcon, SourceInfo, UrlTemplate};
