//! Typed view of the native engine's callback surface, plus local intents.
//!
//! The engine delivers callbacks as (group id, JSON string) pairs on its own
//! threads.  The integration shim turns each callback into one of these
//! events and sends it to the bridge task; payload JSON stays opaque here
//! and is parsed where it is applied.
//!
//! The bridge task is the only writer of live state, so user actions that
//! change state ahead of an engine confirmation (requesting transmit,
//! muting, selecting a group) travel down the same channel as the
//! `Tx*`/`Set*`/`Select*` variants below.  Ordering between an intent and
//! the engine's answer to it is then the channel order, not thread luck.

use muster_shared::{GroupId, NodeId};

/// One event for the bridge to apply: an engine callback or a local intent.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    GroupCreated(GroupId),
    GroupCreateFailed(GroupId),

    GroupJoined(GroupId),
    GroupJoinFailed(GroupId),
    GroupLeft(GroupId),

    GroupRxStarted(GroupId),
    GroupRxEnded(GroupId),

    GroupTxStarted(GroupId),
    GroupTxEnded(GroupId),
    GroupTxFailed(GroupId),
    GroupTxUsurped(GroupId),
    /// The engine cut the transmission at the group's max-tx-seconds limit.
    GroupMaxTxTimeExceeded(GroupId),

    /// Complete replacement talker list for a group.
    GroupTalkers { group_id: GroupId, json: String },

    /// A node appeared on a presence group.
    PresenceDiscovered { group_id: GroupId, json: String },
    /// A known node sent a fresh presence payload.
    PresenceRediscovered { group_id: GroupId, json: String },
    /// A node timed out or departed.
    PresenceUndiscovered { group_id: GroupId, node_id: NodeId },

    /// Biometric data-series blob attributed to a node.
    BiometricsReceived { node_id: NodeId, json: String },

    // Local intents, sent by the UI alongside the matching engine call.
    /// Transmit was requested; the group shows tx-pending until the engine
    /// answers with `GroupTxStarted` or `GroupTxFailed`.
    TxRequested(GroupId),
    SetRxMuted { group_id: GroupId, muted: bool },
    SetTxMuted { group_id: GroupId, muted: bool },
    /// Make this group the single-view selection (exclusive).
    SelectSingle(GroupId),
    /// Toggle a group's membership in the multi-view selection.
    SelectMulti { group_id: GroupId, selected: bool },
}

impl EngineEvent {
    /// The group this event concerns, when it concerns one.
    pub fn group_id(&self) -> Option<&GroupId> {
        use EngineEvent::*;
        match self {
            GroupCreated(id) | GroupCreateFailed(id) | GroupJoined(id) | GroupJoinFailed(id)
            | GroupLeft(id) | GroupRxStarted(id) | GroupRxEnded(id) | GroupTxStarted(id)
            | GroupTxEnded(id) | GroupTxFailed(id) | GroupTxUsurped(id)
            | GroupMaxTxTimeExceeded(id) | TxRequested(id) | SelectSingle(id) => Some(id),
            GroupTalkers { group_id, .. }
            | PresenceDiscovered { group_id, .. }
            | PresenceRediscovered { group_id, .. }
            | PresenceUndiscovered { group_id, .. }
            | SetRxMuted { group_id, .. }
            | SetTxMuted { group_id, .. }
            | SelectMulti { group_id, .. } => Some(group_id),
            BiometricsReceived { .. } => None,
        }
    }
}
