//! Who is currently transmitting on a group.
//!
//! Talker lists are ephemeral: the engine sends the complete current list on
//! every change and the previous list is discarded wholesale.

use serde::Deserialize;

use muster_shared::NodeId;

use crate::error::Result;

/// Bit 0 of `rxFlags`: the talker declared an emergency transmission.
pub const RX_FLAG_EMERGENCY: u32 = 0x1;

/// One currently-transmitting node on a group.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TalkerDescriptor {
    #[serde(default)]
    pub alias: String,

    #[serde(rename = "nodeId", default)]
    pub node_id: NodeId,

    #[serde(rename = "rxFlags", default)]
    pub rx_flags: u32,

    #[serde(rename = "txPriority", default)]
    pub tx_priority: i32,

    /// Engine-supplied alias disambiguator (e.g. radio channel tag).
    #[serde(rename = "aliasSpecializer", default)]
    pub alias_specializer: String,

    #[serde(rename = "rxMuted", default)]
    pub rx_muted: bool,
}

impl TalkerDescriptor {
    pub fn is_emergency(&self) -> bool {
        self.rx_flags & RX_FLAG_EMERGENCY != 0
    }
}

/// Wire form of the engine's talker-list callback payload.
#[derive(Debug, Deserialize)]
struct TalkerListWire {
    #[serde(default)]
    list: Vec<TalkerDescriptor>,
}

/// Parse a talker-list payload into the new, complete list.
pub fn parse_talker_list(json: &str) -> Result<Vec<TalkerDescriptor>> {
    let wire: TalkerListWire = serde_json::from_str(json)?;
    Ok(wire.list)
}

/// Render a talker list as the comma-joined line the group card shows.
///
/// Emergency talkers get a `*` suffix.  The exact format (`"Alpha*, Bravo"`)
/// is a UI contract; widgets parse it back apart, so don't restyle it here.
pub fn format_talker_line(talkers: &[TalkerDescriptor]) -> String {
    let mut line = String::new();
    for t in talkers {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(&t.alias);
        if t.is_emergency() {
            line.push('*');
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talker(alias: &str, rx_flags: u32) -> TalkerDescriptor {
        TalkerDescriptor {
            alias: alias.into(),
            node_id: NodeId::from(alias),
            rx_flags,
            tx_priority: 0,
            alias_specializer: String::new(),
            rx_muted: false,
        }
    }

    #[test]
    fn emergency_talker_gets_star() {
        let talkers = vec![talker("Alpha", RX_FLAG_EMERGENCY), talker("Bravo", 0)];
        assert_eq!(format_talker_line(&talkers), "Alpha*, Bravo");
    }

    #[test]
    fn empty_list_formats_empty() {
        assert_eq!(format_talker_line(&[]), "");
    }

    #[test]
    fn single_talker_has_no_separator() {
        assert_eq!(format_talker_line(&[talker("Solo", 0)]), "Solo");
    }

    #[test]
    fn parses_engine_payload() {
        let json = r#"{"list":[
            {"alias":"Alpha","nodeId":"n-1","rxFlags":1,"txPriority":2},
            {"alias":"Bravo","nodeId":"n-2"}
        ]}"#;
        let talkers = parse_talker_list(json).unwrap();
        assert_eq!(talkers.len(), 2);
        assert!(talkers[0].is_emergency());
        assert_eq!(talkers[0].tx_priority, 2);
        assert!(!talkers[1].is_emergency());
    }

    #[test]
    fn missing_list_field_is_empty() {
        assert!(parse_talker_list("{}").unwrap().is_empty());
        assert!(parse_talker_list("not json").is_err());
    }
}
