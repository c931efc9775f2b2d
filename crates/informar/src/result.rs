//! Result and error types for Informar.

use thiserror::Error;

/// Result type for reporter operations
pub type InformarResult<T> = Result<T, InformarError>;

/// Errors that can occur while translating events
///
/// An absent coverage summary is not an error: it is an expected state
/// reported through the protocol itself, never a reason to abort.
#[derive(Debug, Error)]
pub enum InformarError {
    /// Output sink write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Event stream decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
