//! Lookup keys: the hostname a favicon belongs to and the requested pixel size.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::CoreError;

// ============================================================================
// Domain
// ============================================================================

/// Lowercased hostname of a page URL.
///
/// Favicons are per-site, so every page on `example.com` shares one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// Extracts the hostname from a full page URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`] if the string does not parse as an
    /// absolute URL, and [`CoreError::MissingHost`] if it parses but has no
    /// host (`mailto:`, `data:` and friends).
    pub fn from_page_url(page_url: &str) -> Result<Self, CoreError> {
        let parsed = Url::parse(page_url.trim())
            .map_err(|e| CoreError::InvalidUrl(format!("{page_url}: {e}")))?;

        match parsed.host_str() {
            Some(host) if !host.is_empty() => Ok(Self::new(host)),
            _ => Err(CoreError::MissingHost(page_url.to_string())),
        }
    }

    /// Wraps an already-extracted hostname.
    ///
    /// The value is trimmed and lowercased, and a trailing root dot is dropped,
    /// so `Example.COM.` and `example.com` share a cache slot.
    pub fn new(host: impl AsRef<str>) -> Self {
        let host = host.as_ref().trim().trim_end_matches('.');
        Self(host.to_ascii_lowercase())
    }

    /// Returns the hostname.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Icon Size
// ============================================================================

/// Requested icon edge length in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct IconSize(u32);

impl IconSize {
    /// Size used when the caller has no preference.
    pub const DEFAULT: IconSize = IconSize(32);

    /// Size of the last-resort lookup.
    pub const FALLBACK: IconSize = IconSize(16);

    /// Creates a size.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIconSize`] for zero.
    pub fn new(pixels: u32) -> Result<Self, CoreError> {
        if pixels == 0 {
            return Err(CoreError::InvalidIconSize(pixels));
        }
        Ok(Self(pixels))
    }

    /// Returns the size in pixels.
    pub fn pixels(self) -> u32 {
        self.0
    }
}

impl Default for IconSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for IconSize {
    type Error = CoreError;

    fn try_from(pixels: u32) -> Result<Self, Self::Error> {
        Self::new(pixels)
    }
}

impl From<IconSize> for u32 {
    fn from(size: IconSize) -> Self {
        size.0
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}
