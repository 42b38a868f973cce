//! Live runtime view of one group in the active mission.

use chrono::{DateTime, Utc};

use muster_config::GroupConfig;
use muster_shared::{GroupId, GroupType};

use crate::error::Result;
use crate::talker::{format_talker_line, TalkerDescriptor};

/// Dynamic, engine-driven state of a group.
///
/// Reset to defaults whenever the group is re-created; never persisted.
/// The create/join/tx flag families are independent of each other — the
/// engine drives them and this struct records, it does not validate
/// transition legality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRuntime {
    /// Selected in the single-group view.
    pub selected_single: bool,
    /// Selected in the multi-group view.
    pub selected_multi: bool,

    pub created: bool,
    pub create_error: bool,

    pub joined: bool,
    pub join_error: bool,

    /// Receiving audio right now.
    pub rx: bool,
    /// Transmitting right now.
    pub tx: bool,
    /// Transmit requested, engine has not confirmed yet.
    pub tx_pending: bool,
    pub tx_error: bool,
    /// Our transmission was preempted by a higher-priority talker.
    pub tx_usurped: bool,

    pub rx_muted: bool,
    pub tx_muted: bool,

    pub last_tx_start: Option<DateTime<Utc>>,
}

/// One group of the active mission: static configuration identity plus the
/// engine-reported runtime state and the current talker list.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDescriptor {
    // Static part, fixed at mission activation.
    pub id: GroupId,
    pub group_type: GroupType,
    pub name: String,
    pub encrypted: bool,
    pub full_duplex: bool,
    /// The group's full configuration JSON, kept verbatim for lazy
    /// re-parsing (e.g. when deriving a storable mission from live state).
    pub raw_config: String,

    // Dynamic part.
    pub runtime: GroupRuntime,
    pub talkers: Vec<TalkerDescriptor>,
}

impl GroupDescriptor {
    /// Build a descriptor from a group's static configuration.
    pub fn from_config(config: &GroupConfig) -> Result<Self> {
        Ok(Self {
            id: config.id.clone(),
            group_type: config.group_type,
            name: config.name.clone(),
            encrypted: config.use_crypto,
            full_duplex: config.full_duplex,
            raw_config: config.to_json()?,
            runtime: GroupRuntime::default(),
            talkers: Vec::new(),
        })
    }

    /// Re-parse the stored configuration JSON.
    pub fn config(&self) -> Result<GroupConfig> {
        Ok(GroupConfig::from_json(&self.raw_config)?)
    }

    /// Reset all dynamic state, as happens when the group is re-created.
    pub fn reset_state(&mut self) {
        self.runtime = GroupRuntime::default();
        self.talkers.clear();
    }

    /// Inherit another descriptor's entire runtime state.
    ///
    /// Whole-copy, not a sparse merge: this is used when a freshly parsed
    /// descriptor must carry forward the previous session's live state
    /// across a reconfiguration, and "freshly parsed" fields are all
    /// defaults that must not win.
    pub fn update_state_from(&mut self, other: &GroupDescriptor) {
        self.runtime = other.runtime.clone();
        self.talkers = other.talkers.clone();
    }

    /// Replace the talker list wholesale with the engine's current list.
    pub fn update_talkers(&mut self, talkers: Vec<TalkerDescriptor>) {
        self.talkers = talkers;
    }

    /// The comma-joined talker line the group card displays.
    pub fn talker_line(&self) -> String {
        format_talker_line(&self.talkers)
    }

    // Engine-event mutators.  Each clears the flags that a real engine
    // sequence would have cleared; none validate ordering.

    pub fn on_created(&mut self) {
        self.reset_state();
        self.runtime.created = true;
    }

    pub fn on_create_failed(&mut self) {
        self.runtime.created = false;
        self.runtime.create_error = true;
    }

    pub fn on_joined(&mut self) {
        self.runtime.joined = true;
        self.runtime.join_error = false;
    }

    pub fn on_join_failed(&mut self) {
        self.runtime.joined = false;
        self.runtime.join_error = true;
    }

    pub fn on_left(&mut self) {
        self.runtime.joined = false;
        self.runtime.rx = false;
        self.runtime.tx = false;
        self.runtime.tx_pending = false;
        self.talkers.clear();
    }

    pub fn on_rx_started(&mut self) {
        self.runtime.rx = true;
    }

    pub fn on_rx_ended(&mut self) {
        self.runtime.rx = false;
        self.talkers.clear();
    }

    pub fn on_tx_requested(&mut self) {
        self.runtime.tx_pending = true;
        self.runtime.tx_error = false;
        self.runtime.tx_usurped = false;
    }

    pub fn on_tx_started(&mut self) {
        self.runtime.tx = true;
        self.runtime.tx_pending = false;
        self.runtime.tx_error = false;
        self.runtime.tx_usurped = false;
        self.runtime.last_tx_start = Some(Utc::now());
    }

    pub fn on_tx_ended(&mut self) {
        self.runtime.tx = false;
        self.runtime.tx_pending = false;
    }

    pub fn on_tx_failed(&mut self) {
        self.runtime.tx = false;
        self.runtime.tx_pending = false;
        self.runtime.tx_error = true;
    }

    pub fn on_tx_usurped(&mut self) {
        self.runtime.tx = false;
        self.runtime.tx_pending = false;
        self.runtime.tx_usurped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> GroupDescriptor {
        let mut cfg = GroupConfig::new(GroupType::Audio, "Alpha Net");
        cfg.id = GroupId::from("g-alpha");
        cfg.use_crypto = true;
        cfg.rx_address = "239.42.0.2".into();
        cfg.rx_port = 48002;
        GroupDescriptor::from_config(&cfg).unwrap()
    }

    #[test]
    fn config_round_trips_through_raw_json() {
        let d = descriptor();
        let cfg = d.config().unwrap();
        assert_eq!(cfg.id, d.id);
        assert_eq!(cfg.rx_port, 48002);
        assert!(cfg.use_crypto);
    }

    #[test]
    fn tx_lifecycle_flags() {
        let mut d = descriptor();
        d.on_tx_requested();
        assert!(d.runtime.tx_pending && !d.runtime.tx);

        d.on_tx_started();
        assert!(d.runtime.tx);
        assert!(!d.runtime.tx_pending);
        assert!(d.runtime.last_tx_start.is_some());

        d.on_tx_usurped();
        assert!(!d.runtime.tx);
        assert!(d.runtime.tx_usurped);

        d.on_tx_started();
        assert!(!d.runtime.tx_usurped, "new tx clears usurped flag");
    }

    #[test]
    fn recreate_resets_dynamic_state_only() {
        let mut d = descriptor();
        d.runtime.joined = true;
        d.runtime.rx = true;
        d.update_talkers(vec![TalkerDescriptor {
            alias: "Alpha".into(),
            node_id: "n-1".into(),
            rx_flags: 0,
            tx_priority: 0,
            alias_specializer: String::new(),
            rx_muted: false,
        }]);

        d.on_created();

        assert!(d.runtime.created);
        assert!(!d.runtime.joined);
        assert!(d.talkers.is_empty());
        // Static identity untouched.
        assert_eq!(d.name, "Alpha Net");
        assert!(!d.raw_config.is_empty());
    }

    #[test]
    fn update_state_from_is_whole_copy() {
        let mut live = descriptor();
        live.runtime.joined = true;
        live.runtime.rx_muted = true;

        let mut fresh = descriptor();
        fresh.runtime.tx_error = true; // would be lost by design

        fresh.update_state_from(&live);
        assert_eq!(fresh.runtime, live.runtime);
        assert!(!fresh.runtime.tx_error);
    }
}
