//! Registry errors.

use thiserror::Error;

/// Errors from looking up or selecting providers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A name matched no provider or alias.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// A selection named no providers at all.
    #[error("provider selection is empty")]
    EmptySelection,
}
