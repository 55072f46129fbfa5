//! Error types for the assistant session engine.

use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Session-level failures — these short-circuit before any state mutation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("System not initialized")]
    NotInitialized,
}

/// Persistence errors.
///
/// Flushes are best-effort: a failed save is logged and the session keeps
/// operating on in-memory state, rewriting the full value on the next write.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Collaborator (commerce/messaging/location) call failures.
///
/// Always caught at the handler boundary and converted into a user-facing
/// outcome — never propagated to the session caller.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{service} is unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    #[error("{service} call timed out after {timeout:?}")]
    Timeout { service: String, timeout: Duration },

    #[error("{service} rejected the request: {reason}")]
    Rejected { service: String, reason: String },

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

/// Result type alias for the session engine.
pub type Result<T> = std::result::Result<T, Error>;
