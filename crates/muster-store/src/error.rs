use thiserror::Error;

use muster_shared::MissionId;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored mission row failed to re-parse.
    #[error("Mission config error: {0}")]
    Config(#[from] muster_config::ConfigError),

    /// Legacy import payload was not valid JSON at the top level.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Legacy import payload parsed but was not the expected array layout.
    #[error("Legacy mission list format error: {0}")]
    LegacyFormat(String),

    /// Deleting the mission the client is currently running is refused.
    #[error("Mission {0} is active and cannot be deleted")]
    MissionActive(MissionId),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
