use thiserror::Error;

/// Errors produced by the configuration layer.
///
/// A malformed record fails as a whole: `from_json` never yields a
/// partially populated config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Group config has an empty id")]
    EmptyGroupId,

    #[error("Mission config has an empty id")]
    EmptyMissionId,

    #[error("Passphrase must not be empty")]
    EmptyPassphrase,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
