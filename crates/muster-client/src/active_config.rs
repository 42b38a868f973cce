//! The live state of the currently active mission.

use std::collections::HashMap;

use tracing::{debug, warn};

use muster_config::MissionConfig;
use muster_presence::{BiometricSeries, PresenceDescriptor};
use muster_shared::{GroupId, NodeId};

use crate::engine::EngineEvent;
use crate::error::{ClientError, Result};
use crate::events::StateEvent;
use crate::group::GroupDescriptor;
use crate::talker::parse_talker_list;

/// Everything the UI renders: the active mission's group descriptors plus
/// the presence map of every known remote node.
///
/// Owned exclusively by the bridge task; consumers only ever see it behind
/// an `Arc` snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveConfiguration {
    /// The mission as it was activated.  `mission.groups` stays the
    /// configured list; live state lives in `groups` below.
    pub mission: MissionConfig,

    /// One live descriptor per configured group, in mission order.
    pub groups: Vec<GroupDescriptor>,

    /// Every remote node we have heard presence from, keyed by node id.
    pub nodes: HashMap<NodeId, PresenceDescriptor>,
}

impl ActiveConfiguration {
    /// Activate a mission: build a fresh descriptor per configured group.
    pub fn activate(mission: MissionConfig) -> Result<Self> {
        let groups = mission
            .groups
            .iter()
            .map(GroupDescriptor::from_config)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mission,
            groups,
            nodes: HashMap::new(),
        })
    }

    pub fn group(&self, id: &GroupId) -> Option<&GroupDescriptor> {
        self.groups.iter().find(|g| &g.id == id)
    }

    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut GroupDescriptor> {
        self.groups.iter_mut().find(|g| &g.id == id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&PresenceDescriptor> {
        self.nodes.get(id)
    }

    /// Apply one engine event.  Returns the notification the UI should get,
    /// or `None` when nothing observable changed.
    ///
    /// A failed presence or talker parse leaves the previous state in place
    /// — the UI keeps showing last-known-good data.
    pub fn apply(&mut self, event: EngineEvent) -> Result<Option<StateEvent>> {
        use EngineEvent::*;

        match event {
            GroupCreated(id) => self.with_group(&id, |g| g.on_created()),
            GroupCreateFailed(id) => self.with_group(&id, |g| g.on_create_failed()),
            GroupJoined(id) => self.with_group(&id, |g| g.on_joined()),
            GroupJoinFailed(id) => self.with_group(&id, |g| g.on_join_failed()),
            GroupLeft(id) => self.with_group(&id, |g| g.on_left()),
            GroupRxStarted(id) => self.with_group(&id, |g| g.on_rx_started()),
            GroupRxEnded(id) => self.with_group(&id, |g| g.on_rx_ended()),
            GroupTxStarted(id) => self.with_group(&id, |g| g.on_tx_started()),
            GroupTxEnded(id) => self.with_group(&id, |g| g.on_tx_ended()),
            GroupTxFailed(id) => self.with_group(&id, |g| g.on_tx_failed()),
            GroupTxUsurped(id) => self.with_group(&id, |g| g.on_tx_usurped()),
            GroupMaxTxTimeExceeded(id) => self.with_group(&id, |g| g.on_tx_ended()),

            TxRequested(id) => self.with_group(&id, |g| g.on_tx_requested()),
            SetRxMuted { group_id, muted } => {
                self.with_group(&group_id, |g| g.runtime.rx_muted = muted)
            }
            SetTxMuted { group_id, muted } => {
                self.with_group(&group_id, |g| g.runtime.tx_muted = muted)
            }
            SelectSingle(id) => {
                if self.group(&id).is_none() {
                    return Err(ClientError::UnknownGroup(id));
                }
                for g in &mut self.groups {
                    g.runtime.selected_single = g.id == id;
                }
                Ok(Some(StateEvent::GroupChanged(id)))
            }
            SelectMulti { group_id, selected } => {
                self.with_group(&group_id, |g| g.runtime.selected_multi = selected)
            }

            GroupTalkers { group_id, json } => {
                let talkers = parse_talker_list(&json)?;
                let group = self
                    .group_mut(&group_id)
                    .ok_or_else(|| ClientError::UnknownGroup(group_id.clone()))?;
                group.update_talkers(talkers);
                debug!(group = %group_id, line = %group.talker_line(), "talkers updated");
                Ok(Some(StateEvent::TalkersChanged(group_id)))
            }

            PresenceDiscovered { json, .. } | PresenceRediscovered { json, .. } => {
                self.apply_presence(&json)
            }

            PresenceUndiscovered { node_id, .. } => {
                if self.nodes.remove(&node_id).is_some() {
                    Ok(Some(StateEvent::NodeLeft(node_id)))
                } else {
                    Ok(None)
                }
            }

            BiometricsReceived { node_id, json } => {
                let series: BiometricSeries = serde_json::from_str(&json)?;
                // A node can report biometrics before its first presence
                // payload; start a skeleton descriptor for it.
                let node = self.nodes.entry(node_id.clone()).or_insert_with(|| {
                    PresenceDescriptor {
                        node_id: node_id.clone(),
                        ..Default::default()
                    }
                });
                node.update_biometrics(series);
                Ok(Some(StateEvent::NodeChanged(node_id)))
            }
        }
    }

    fn with_group(
        &mut self,
        id: &GroupId,
        f: impl FnOnce(&mut GroupDescriptor),
    ) -> Result<Option<StateEvent>> {
        let group = self
            .group_mut(id)
            .ok_or_else(|| ClientError::UnknownGroup(id.clone()))?;
        f(group);
        Ok(Some(StateEvent::GroupChanged(id.clone())))
    }

    /// Authoritative-parse the payload, then fold it into the node map:
    /// a new node is inserted as-is, a known node gets the sparse merge so
    /// absent fields keep their last-known-good values.
    fn apply_presence(&mut self, json: &str) -> Result<Option<StateEvent>> {
        let incoming = PresenceDescriptor::from_json(json)?;
        let node_id = incoming.node_id.clone();

        match self.nodes.get_mut(&node_id) {
            Some(existing) => {
                if !existing.merge_from(&incoming) {
                    // Unreachable with a map keyed by node id, but don't
                    // silently drop it if the invariant ever breaks.
                    warn!(node = %node_id.short(), "presence merge refused");
                    return Ok(None);
                }
            }
            None => {
                self.nodes.insert(node_id.clone(), incoming);
            }
        }

        Ok(Some(StateEvent::NodeChanged(node_id)))
    }

    /// Derive a storable mission from the live state by re-parsing each
    /// descriptor's embedded configuration JSON.
    ///
    /// The first presence-type group encountered in group order becomes the
    /// mission's multicast anchor; later presence groups are carried in the
    /// group list but do not win the anchor (the mission format supports
    /// only one).  Any group that fails to re-parse aborts the whole
    /// derivation — no partial mission is returned.
    pub fn derive_mission(&self) -> Result<MissionConfig> {
        let mut mission = self.mission.clone();
        mission.groups.clear();
        mission.mc_id.clear();
        mission.mc_address.clear();
        mission.mc_port = 0;
        mission.mc_crypto_password.clear();

        for descriptor in &self.groups {
            let config = descriptor.config()?;
            if config.is_presence() && mission.mc_id.is_empty() {
                mission.mc_id = config.id.as_str().to_string();
                mission.mc_address = config.rx_address.clone();
                mission.mc_port = config.rx_port;
                mission.mc_crypto_password = config.crypto_password.clone();
            }
            mission.groups.push(config);
        }

        Ok(mission)
    }
}
