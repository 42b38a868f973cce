use thiserror::Error;

/// Errors produced by the presence layer.
#[derive(Error, Debug)]
pub enum PresenceError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The mandatory `identity.nodeId` field was absent or empty.  The whole
    /// update is rejected; the caller keeps its previous descriptor.
    #[error("Presence payload is missing identity.nodeId")]
    MissingNodeId,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PresenceError>;
