//! The built-in placeholder icon.
//!
//! Returned whenever no provider produced a usable favicon. It is embedded
//! in the binary so it never depends on the network.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::sync::LazyLock;

/// Neutral globe glyph shown for sites without a resolvable favicon.
pub const DEFAULT_ICON_SVG: &str = concat!(
    r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "##,
    r##"fill="none" stroke="#9aa0a6" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"##,
    r##"<circle cx="12" cy="12" r="10"/>"##,
    r##"<line x1="2" y1="12" x2="22" y2="12"/>"##,
    r##"<path d="M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z"/>"##,
    r##"</svg>"##
);

static DEFAULT_ICON_URI: LazyLock<String> = LazyLock::new(|| {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(DEFAULT_ICON_SVG)
    )
});

/// Returns the placeholder icon as a `data:` URI usable as an image source.
pub fn default_icon_uri() -> &'static str {
    DEFAULT_ICON_URI.as_str()
}

/// Returns true if `icon` is the placeholder.
pub fn is_default_icon(icon: &str) -> bool {
    icon == default_icon_uri()
}
