//! # muster-config
//!
//! Mission and group configuration model.
//!
//! A *mission* is the top-level unit a user joins: a named bundle of group
//! definitions plus rallypoint/multicast settings.  A *group* is a single
//! communication channel within a mission (audio, presence, or raw data).
//!
//! The JSON layout of both records is owned by the native engine — field
//! names are underscore-prefixed and must round-trip exactly, which is why
//! every struct here carries explicit `serde(rename)` attributes.

pub mod group;
pub mod mission;
pub mod passphrase;

mod error;

pub use error::{ConfigError, Result};
pub use group::GroupConfig;
pub use mission::{MissionConfig, MulticastFailoverPolicy};
pub use passphrase::mission_from_passphrase;
