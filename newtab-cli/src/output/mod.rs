//! Output formatting for CLI.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// A resolved URL ready for display.
#[derive(Debug, Clone)]
pub struct IconReport {
    /// The input exactly as given.
    pub url: String,
    /// Icon URL or the default icon data URI.
    pub icon: String,
    /// Why the input was rejected, if it was.
    pub error: Option<String>,
}

impl IconReport {
    /// Creates a report for a successfully handled input.
    pub fn new(url: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            icon: icon.into(),
            error: None,
        }
    }

    /// Creates a report for a rejected input.
    pub fn rejected(url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            url: url.into(),
            icon: newtab_core::default_icon_uri().to_string(),
            error: Some(error.to_string()),
        }
    }
}
