//! # muster-presence
//!
//! Live state of remote nodes, rebuilt from the engine's presence JSON.
//!
//! Two distinct update paths exist and their asymmetry is the whole point of
//! this crate:
//!
//! - [`PresenceDescriptor::from_json`] is **authoritative**: the payload
//!   replaces everything previously known about the node (except accumulated
//!   biometrics, which outlive presence churn).
//! - [`PresenceDescriptor::merge_from`] is **incremental**: only fields the
//!   incoming descriptor actually carries overwrite the stored ones, so a
//!   sparse update never erases last-known-good data.

pub mod biometrics;
pub mod descriptor;
pub mod location;
pub mod status;

mod error;

pub use biometrics::{BiometricKind, BiometricSample, BiometricSeries, UserBiometrics};
pub use descriptor::PresenceDescriptor;
pub use error::{PresenceError, Result};
pub use location::Location;
pub use status::{Connectivity, Power};
