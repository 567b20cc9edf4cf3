//! Core error types for Siteline
//!
//! The public read/write surface of the tracking core reports missing rows
//! and rejected transitions through sentinel return values (`Option`, `bool`,
//! `ToggleOutcome`), never through `Err`. The only `Result`-carrying boundary
//! is the persistence adapter, and every caller of that boundary catches and
//! logs the failure rather than propagating it.

use thiserror::Error;

/// Errors raised inside the persistence adapter.
///
/// These never escape the store layer: a failed save leaves the in-memory
/// store authoritative for the session, a failed load leaves the store
/// untouched.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for persistence adapter operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
