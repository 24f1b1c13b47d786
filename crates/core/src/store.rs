//! Errors reported by persistence collaborators.

use thiserror::Error;

/// A failure reported by a store, carrying the status it wants surfaced.
///
/// Callers propagate it unchanged: the store decides status, code and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct StoreError {
    /// HTTP status attached by the store.
    pub status: u16,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl StoreError {
    /// Creates a store error.
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// A backend failure (status 500).
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(500, "erp_ac_db_error", message)
    }
}
