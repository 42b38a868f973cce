//! Notifications the bridge emits for the UI after applying engine events.
//!
//! These are deliberately coarse: the UI re-reads the affected entity from
//! the latest snapshot rather than diffing payloads.

use muster_shared::{GroupId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// A group's runtime flags changed; re-render its card.
    GroupChanged(GroupId),
    /// A group's talker list changed.
    TalkersChanged(GroupId),
    /// A node's presence was added or updated.
    NodeChanged(NodeId),
    /// A node left the presence net and was removed.
    NodeLeft(NodeId),
}
