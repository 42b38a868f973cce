//! The live descriptor for one remote node.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use muster_shared::{GroupId, NodeId};

use crate::biometrics::{BiometricSeries, UserBiometrics};
use crate::error::{PresenceError, Result};
use crate::location::Location;
use crate::status::{Connectivity, Power};

/// Wire form of a presence payload, engine field names.
#[derive(Debug, Deserialize)]
struct PresenceWire {
    #[serde(rename = "self", default)]
    is_self: bool,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    custom: String,
    identity: Option<IdentityWire>,
    // Parsed leniently: a garbled location must not sink the whole update.
    location: Option<serde_json::Value>,
    power: Option<Power>,
    connectivity: Option<Connectivity>,
    #[serde(rename = "groupAlias", default)]
    group_aliases: Vec<GroupAliasWire>,
}

#[derive(Debug, Deserialize)]
struct IdentityWire {
    #[serde(rename = "nodeId", default)]
    node_id: String,
    #[serde(rename = "userId", default)]
    user_id: String,
    #[serde(rename = "displayName", default)]
    display_name: String,
    #[serde(rename = "type", default)]
    node_type: i32,
    #[serde(default)]
    format: i32,
}

#[derive(Debug, Deserialize)]
struct GroupAliasWire {
    #[serde(rename = "groupId")]
    group_id: GroupId,
    #[serde(default)]
    alias: String,
}

/// Everything known about one remote node.
///
/// Rebuilt wholesale by [`from_json`] / [`apply_json`], selectively patched
/// by [`merge_from`].  Biometrics accumulate independently of both paths.
///
/// [`from_json`]: PresenceDescriptor::from_json
/// [`apply_json`]: PresenceDescriptor::apply_json
/// [`merge_from`]: PresenceDescriptor::merge_from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceDescriptor {
    pub node_id: NodeId,
    pub user_id: String,
    pub display_name: String,
    pub node_type: i32,
    pub format: i32,

    /// True when this payload describes the local node.
    pub is_self: bool,
    pub comment: String,
    pub custom: String,

    /// Validated location, `None` when absent or rejected.
    pub location: Option<Location>,
    pub power: Option<Power>,
    pub connectivity: Option<Connectivity>,

    /// Per-group display alias overrides.
    pub group_aliases: HashMap<GroupId, String>,

    /// Accumulated biometric series.  Never cleared by presence updates.
    pub biometrics: UserBiometrics,

    /// When this descriptor last changed, local clock.
    pub last_updated: Option<DateTime<Utc>>,
}

impl PresenceDescriptor {
    /// Build a descriptor from an authoritative presence payload.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut pd = Self::default();
        pd.apply_json(json)?;
        Ok(pd)
    }

    /// Full-replace update from an authoritative payload.
    ///
    /// Clears every field except `biometrics`, then repopulates.  If the
    /// payload lacks `identity.nodeId` the error is returned *before*
    /// anything is cleared, so the existing state survives a bad update.
    pub fn apply_json(&mut self, json: &str) -> Result<()> {
        let wire: PresenceWire = serde_json::from_str(json)?;
        let identity = wire.identity.ok_or(PresenceError::MissingNodeId)?;
        if identity.node_id.is_empty() {
            return Err(PresenceError::MissingNodeId);
        }

        self.clear();

        self.node_id = NodeId(identity.node_id);
        self.user_id = identity.user_id;
        self.display_name = identity.display_name;
        self.node_type = identity.node_type;
        self.format = identity.format;
        self.is_self = wire.is_self;
        self.comment = wire.comment;
        self.custom = wire.custom;
        self.power = wire.power;
        self.connectivity = wire.connectivity;

        // Partial trust: a bad fix drops the location, not the update.
        self.location = wire.location.and_then(|raw| {
            match serde_json::from_value::<Location>(raw) {
                Ok(loc) if loc.is_valid() => Some(loc),
                Ok(loc) => {
                    debug!(node = %self.node_id.short(), ?loc, "dropping invalid location");
                    None
                }
                Err(e) => {
                    debug!(node = %self.node_id.short(), error = %e, "dropping malformed location");
                    None
                }
            }
        });

        self.group_aliases = wire
            .group_aliases
            .into_iter()
            .map(|ga| (ga.group_id, ga.alias))
            .collect();

        self.last_updated = Some(Utc::now());
        Ok(())
    }

    /// Reset every field to its default except the biometric history.
    pub fn clear(&mut self) {
        let biometrics = std::mem::take(&mut self.biometrics);
        *self = Self {
            biometrics,
            ..Self::default()
        };
    }

    /// Sparse-overwrite merge of an incremental update.
    ///
    /// Requires a matching node id; a mismatch is a no-op returning `false`.
    /// Otherwise each field is overwritten only when the incoming value is
    /// non-empty / present, so fields the update doesn't mention keep their
    /// last-known-good values.  `is_self` is identity-stable and never
    /// toggled by a merge.
    pub fn merge_from(&mut self, incoming: &PresenceDescriptor) -> bool {
        if incoming.node_id != self.node_id {
            return false;
        }

        if !incoming.user_id.is_empty() {
            self.user_id = incoming.user_id.clone();
        }
        if !incoming.display_name.is_empty() {
            self.display_name = incoming.display_name.clone();
        }
        if incoming.node_type != 0 {
            self.node_type = incoming.node_type;
        }
        if incoming.format != 0 {
            self.format = incoming.format;
        }
        if !incoming.comment.is_empty() {
            self.comment = incoming.comment.clone();
        }
        if !incoming.custom.is_empty() {
            self.custom = incoming.custom.clone();
        }
        if let Some(loc) = &incoming.location {
            self.location = Some(loc.clone());
        }
        if let Some(p) = incoming.power {
            self.power = Some(p);
        }
        if let Some(c) = incoming.connectivity {
            self.connectivity = Some(c);
        }
        for (gid, alias) in &incoming.group_aliases {
            if !alias.is_empty() {
                self.group_aliases.insert(gid.clone(), alias.clone());
            }
        }

        self.last_updated = Some(Utc::now());
        true
    }

    /// Merge one biometric data series into the node's history, creating it
    /// lazily on first use.
    pub fn update_biometrics(&mut self, series: BiometricSeries) {
        self.biometrics.merge_series(series);
        self.last_updated = Some(Utc::now());
    }

    /// Display alias for a specific group, falling back to the node-wide
    /// display name.
    pub fn alias_for(&self, group_id: &GroupId) -> &str {
        self.group_aliases
            .get(group_id)
            .filter(|a| !a.is_empty())
            .map(String::as_str)
            .unwrap_or(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biometrics::{BiometricKind, BiometricSample};

    const FULL_PAYLOAD: &str = r#"{
        "self": false,
        "comment": "on patrol",
        "custom": "{\"team\":\"blue\"}",
        "identity": {
            "nodeId": "node-42",
            "userId": "cpl.dana",
            "displayName": "Dana",
            "type": 1,
            "format": 1
        },
        "location": {"latitude": 48.2, "longitude": 16.3, "altitude": 171.0, "speed": 1.4, "direction": 90.0},
        "power": {"source": 1, "state": 2, "level": 81},
        "connectivity": {"type": 2, "strength": -61, "rating": 4},
        "groupAlias": [{"groupId": "g-alpha", "alias": "Hammer-6"}]
    }"#;

    fn hr_series() -> BiometricSeries {
        BiometricSeries {
            kind: BiometricKind::HeartRate,
            base_timestamp: 100,
            samples: vec![BiometricSample {
                offset_secs: 0,
                value: 64,
            }],
        }
    }

    #[test]
    fn full_payload_populates_everything() {
        let pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();
        assert_eq!(pd.node_id.as_str(), "node-42");
        assert_eq!(pd.display_name, "Dana");
        assert_eq!(pd.comment, "on patrol");
        assert!(pd.location.is_some());
        assert_eq!(pd.power.unwrap().level, 81);
        assert_eq!(pd.connectivity.unwrap().rating, 4);
        assert_eq!(pd.alias_for(&GroupId::from("g-alpha")), "Hammer-6");
        assert_eq!(pd.alias_for(&GroupId::from("g-other")), "Dana");
        assert!(pd.last_updated.is_some());
    }

    #[test]
    fn missing_node_id_fails_whole_update_and_keeps_state() {
        let mut pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();
        let res = pd.apply_json(r#"{"identity": {"displayName": "ghost"}}"#);
        assert!(matches!(res, Err(PresenceError::MissingNodeId)));
        // The failed update must not have wiped anything.
        assert_eq!(pd.display_name, "Dana");
        assert!(pd.location.is_some());

        assert!(PresenceDescriptor::from_json(r#"{"comment": "no identity"}"#).is_err());
    }

    #[test]
    fn out_of_range_latitude_drops_location_only() {
        let json = FULL_PAYLOAD.replace("48.2", "200.0");
        let pd = PresenceDescriptor::from_json(&json).unwrap();
        assert!(pd.location.is_none());
        // Everything else still populated.
        assert_eq!(pd.node_id.as_str(), "node-42");
        assert_eq!(pd.power.unwrap().level, 81);
    }

    #[test]
    fn garbled_location_object_drops_location_only() {
        let json = r#"{
            "identity": {"nodeId": "node-42"},
            "location": {"latitude": "not a number"},
            "comment": "still fine"
        }"#;
        let pd = PresenceDescriptor::from_json(json).unwrap();
        assert!(pd.location.is_none());
        assert_eq!(pd.comment, "still fine");
    }

    #[test]
    fn clear_preserves_only_biometrics() {
        let mut pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();
        pd.update_biometrics(hr_series());

        pd.clear();

        assert!(pd.node_id.is_empty());
        assert!(pd.display_name.is_empty());
        assert!(pd.location.is_none());
        assert!(pd.power.is_none());
        assert!(pd.group_aliases.is_empty());
        assert!(pd.last_updated.is_none());
        assert_eq!(pd.biometrics.latest(BiometricKind::HeartRate), Some(64));
    }

    #[test]
    fn apply_json_replaces_but_keeps_biometrics() {
        let mut pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();
        pd.update_biometrics(hr_series());

        pd.apply_json(r#"{"identity": {"nodeId": "node-42"}}"#).unwrap();

        // Authoritative update: absent fields are gone...
        assert!(pd.comment.is_empty());
        assert!(pd.location.is_none());
        // ...but biometrics survive.
        assert_eq!(pd.biometrics.latest(BiometricKind::HeartRate), Some(64));
    }

    #[test]
    fn empty_merge_is_identity() {
        let mut pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();
        let reference = pd.clone();

        let empty = PresenceDescriptor {
            node_id: NodeId::from("node-42"),
            ..Default::default()
        };
        assert!(pd.merge_from(&empty));

        // Only the update timestamp may move.
        let mut after = pd.clone();
        after.last_updated = reference.last_updated;
        assert_eq!(after, reference);
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();

        let sparse = PresenceDescriptor {
            node_id: NodeId::from("node-42"),
            comment: "RTB".into(),
            power: Some(Power {
                source: 1,
                state: 1,
                level: 40,
            }),
            ..Default::default()
        };
        assert!(pd.merge_from(&sparse));

        assert_eq!(pd.comment, "RTB");
        assert_eq!(pd.power.unwrap().level, 40);
        // Untouched fields keep last-known-good values.
        assert_eq!(pd.display_name, "Dana");
        assert!(pd.location.is_some());
    }

    #[test]
    fn merge_rejects_node_id_mismatch() {
        let mut pd = PresenceDescriptor::from_json(FULL_PAYLOAD).unwrap();
        let other = PresenceDescriptor {
            node_id: NodeId::from("node-99"),
            comment: "imposter".into(),
            ..Default::default()
        };
        assert!(!pd.merge_from(&other));
        assert_eq!(pd.comment, "on patrol");
    }
}
