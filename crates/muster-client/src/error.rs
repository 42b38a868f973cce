use thiserror::Error;

use muster_shared::GroupId;

/// Errors produced by the live-state layer.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] muster_config::ConfigError),

    #[error("Presence error: {0}")]
    Presence(#[from] muster_presence::PresenceError),

    /// The engine referenced a group id the active mission doesn't contain.
    #[error("Unknown group {0}")]
    UnknownGroup(GroupId),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
