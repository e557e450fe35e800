//! CLI command implementations.

pub mod batch;
pub mod check;
pub mod config;
pub mod providers;
pub mod resolve;
