//! Host APIs for newtab probes.
//!
//! - [`http`] - HTTP client with tracing and scheme checks

pub mod http;

// Re-export key types
pub use http::{HttpClient, ResponseExt};
