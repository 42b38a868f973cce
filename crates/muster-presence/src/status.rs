//! Optional power and connectivity sub-objects of a presence payload.

use serde::{Deserialize, Serialize};

/// Device power report.  The numeric codes are engine-defined and passed
/// through for the UI to label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Power {
    /// Power source (battery, wired, ...).
    #[serde(default)]
    pub source: i32,
    /// Charging state.
    #[serde(default)]
    pub state: i32,
    /// Charge level, 0..=100.
    #[serde(default)]
    pub level: i32,
}

/// Network connectivity report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Connectivity {
    /// Bearer type (wifi, cellular, ...).
    #[serde(rename = "type", default)]
    pub kind: i32,
    /// Signal strength as reported by the device.
    #[serde(default)]
    pub strength: i32,
    /// Engine's 0..=5 quality rating.
    #[serde(default)]
    pub rating: i32,
}
