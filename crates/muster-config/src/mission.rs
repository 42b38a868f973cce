//! Persisted configuration for a mission: its groups plus rallypoint and
//! multicast-failover settings.

use serde::{Deserialize, Serialize};
use tracing::warn;

use muster_shared::{GroupId, MissionId};

use crate::error::{ConfigError, Result};
use crate::group::GroupConfig;

/// What the engine should do when multicast traffic stops flowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MulticastFailoverPolicy {
    /// Defer to the application-wide setting.
    #[default]
    FollowApplication,
    /// Always fail over to the rallypoint.
    Allow,
    /// Never fail over.
    Deny,
}

impl MulticastFailoverPolicy {
    pub fn code(self) -> i32 {
        match self {
            Self::FollowApplication => 0,
            Self::Allow => 1,
            Self::Deny => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::FollowApplication),
            1 => Some(Self::Allow),
            2 => Some(Self::Deny),
            _ => None,
        }
    }
}

impl Serialize for MulticastFailoverPolicy {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for MulticastFailoverPolicy {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let code = i32::deserialize(d)?;
        Self::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown multicast failover policy {code}"))
        })
    }
}

/// A complete mission definition.
///
/// The serialized form is the engine's mission JSON schema; the designated
/// presence anchor (`_mcId` and friends) duplicates the chosen presence
/// group's settings so the engine can join it without scanning `groups`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MissionConfig {
    #[serde(rename = "_id")]
    pub id: MissionId,

    /// Moderator PIN.  Empty means the mission is unlocked and editable.
    #[serde(rename = "_modPin", default)]
    pub mod_pin: String,

    #[serde(rename = "_name", default)]
    pub name: String,

    #[serde(rename = "_description", default)]
    pub description: String,

    #[serde(rename = "_useRp", default)]
    pub use_rallypoint: bool,

    #[serde(rename = "_rpAddress", default)]
    pub rallypoint_address: String,

    #[serde(rename = "_rpPort", default)]
    pub rallypoint_port: u16,

    #[serde(rename = "multicastFailoverPolicy", default)]
    pub multicast_failover: MulticastFailoverPolicy,

    /// Designated presence group id — the mission's multicast anchor.
    #[serde(rename = "_mcId", default)]
    pub mc_id: String,

    #[serde(rename = "_mcAddress", default)]
    pub mc_address: String,

    #[serde(rename = "_mcPort", default)]
    pub mc_port: u16,

    #[serde(rename = "_mcCryptoPassword", default)]
    pub mc_crypto_password: String,

    /// Ordered group list.  Uniqueness by id is maintained through
    /// [`add_or_replace_group`], not enforced structurally.
    ///
    /// [`add_or_replace_group`]: MissionConfig::add_or_replace_group
    #[serde(rename = "groups", default)]
    pub groups: Vec<GroupConfig>,
}

impl MissionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MissionId::new(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mission: Self = serde_json::from_str(json)?;
        if mission.id.as_str().is_empty() {
            return Err(ConfigError::EmptyMissionId);
        }
        Ok(mission)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The mission is locked when a moderator PIN is set.
    pub fn is_locked(&self) -> bool {
        !self.mod_pin.is_empty()
    }

    pub fn group_by_id(&self, id: &GroupId) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Replace the group with a matching id in place, or append it.
    pub fn add_or_replace_group(&mut self, group: GroupConfig) {
        match self.groups.iter_mut().find(|g| g.id == group.id) {
            Some(slot) => *slot = group,
            None => self.groups.push(group),
        }
    }

    /// Remove a group by id.  Returns `false` if no group matched.
    pub fn remove_group(&mut self, id: &GroupId) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| &g.id != id);
        self.groups.len() != before
    }

    /// The first presence-type group in declaration order.
    ///
    /// A mission is expected to carry at most one presence group; when more
    /// exist only this first one acts as the multicast anchor.  That is a
    /// documented constraint of the mission format, not something we guard
    /// with an error — [`validate`] reports it.
    ///
    /// [`validate`]: MissionConfig::validate
    pub fn presence_anchor(&self) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| g.is_presence())
    }

    /// Copy the presence anchor's settings into the `_mc*` fields.
    pub fn sync_anchor_fields(&mut self) {
        if let Some(anchor) = self.presence_anchor().cloned() {
            self.mc_id = anchor.id.as_str().to_string();
            self.mc_address = anchor.rx_address.clone();
            self.mc_port = anchor.rx_port;
            self.mc_crypto_password = anchor.crypto_password.clone();
        }
    }

    /// Check the mission for constraint violations the format tolerates but
    /// the product does not expect.  Violations are logged and returned;
    /// the mission is still usable.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();

        let presence_count = self.groups.iter().filter(|g| g.is_presence()).count();
        if presence_count > 1 {
            let msg = format!(
                "mission {} has {presence_count} presence groups; only the first acts as anchor",
                self.id
            );
            warn!(mission = %self.id, presence_count, "multiple presence groups");
            findings.push(msg);
        }

        let mut seen = std::collections::HashSet::new();
        for g in &self.groups {
            if !seen.insert(&g.id) {
                let msg = format!("mission {} has duplicate group id {}", self.id, g.id);
                warn!(mission = %self.id, group = %g.id, "duplicate group id");
                findings.push(msg);
            }
        }

        findings
    }
}
