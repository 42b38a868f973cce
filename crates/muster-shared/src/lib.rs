//! # muster-shared
//!
//! Types shared by every Muster crate: group/mission/node identifiers and the
//! engine's group-type codes.
//!
//! The native communications engine speaks JSON with plain string ids, so the
//! id newtypes here are thin wrappers over `String` rather than binary keys.

pub mod types;

pub use types::{GroupId, GroupType, MissionId, NodeId};
