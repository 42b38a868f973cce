//! Persisted configuration for a single group.

use serde::{Deserialize, Serialize};

use muster_shared::{GroupId, GroupType};

use crate::error::{ConfigError, Result};

/// Static configuration for one group within a mission.
///
/// The field names in the serialized form are the engine's underscore-prefixed
/// JSON schema and must not change.  `id` is write-once: it is assigned at
/// creation (or by the parsed JSON) and never rewritten afterwards — every
/// lookup in the mission and in the live runtime keys off it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupConfig {
    #[serde(rename = "_id")]
    pub id: GroupId,

    #[serde(rename = "_type")]
    pub group_type: GroupType,

    #[serde(rename = "_name", default)]
    pub name: String,

    /// Whether traffic on this group is encrypted by the engine.
    #[serde(rename = "_useCrypto", default)]
    pub use_crypto: bool,

    /// Hex password handed to the engine's key derivation.  Opaque here.
    #[serde(rename = "_cryptoPassword", default)]
    pub crypto_password: String,

    #[serde(rename = "_rxAddress", default)]
    pub rx_address: String,

    #[serde(rename = "_rxPort", default)]
    pub rx_port: u16,

    /// Transmit address.  Empty means "same as rx" — see [`tx_endpoint`].
    ///
    /// [`tx_endpoint`]: GroupConfig::tx_endpoint
    #[serde(rename = "_txAddress", default)]
    pub tx_address: String,

    #[serde(rename = "_txPort", default)]
    pub tx_port: u16,

    /// Codec identifier understood by the engine (audio groups only).
    #[serde(rename = "_txCodecId", default)]
    pub tx_codec_id: i32,

    /// Audio framing interval in milliseconds.
    #[serde(rename = "_txFramingMs", default)]
    pub tx_framing_ms: i32,

    /// Suppress the RTP header extension carrying the alias.
    #[serde(rename = "_noHdrExt", default)]
    pub no_header_ext: bool,

    /// Full duplex: rx stays open while transmitting.
    #[serde(rename = "_fdx", default)]
    pub full_duplex: bool,

    /// Maximum seconds a single transmission may hold the channel.
    #[serde(rename = "_maxTxSecs", default)]
    pub max_tx_secs: i32,

    /// Encryption-policy override flag passed through to the engine.
    #[serde(rename = "_ept", default)]
    pub encryption_policy: bool,

    /// Transmit without a user alias in the header extension.
    #[serde(rename = "_anonymousAlias", default)]
    pub anonymous_alias: bool,
}

impl GroupConfig {
    /// Create a group config with a fresh id and everything else defaulted.
    pub fn new(group_type: GroupType, name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            group_type,
            name: name.into(),
            use_crypto: false,
            crypto_password: String::new(),
            rx_address: String::new(),
            rx_port: 0,
            tx_address: String::new(),
            tx_port: 0,
            tx_codec_id: 0,
            tx_framing_ms: 0,
            no_header_ext: false,
            full_duplex: false,
            max_tx_secs: 0,
            encryption_policy: false,
            anonymous_alias: false,
        }
    }

    /// Parse a group config from its engine JSON form.
    ///
    /// Fails as a whole on malformed input; an empty id is rejected even if
    /// the JSON itself is well formed.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        if cfg.id.is_empty() {
            return Err(ConfigError::EmptyGroupId);
        }
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Effective transmit endpoint.  Falls back to the rx address/port when
    /// the tx side was left unset.
    pub fn tx_endpoint(&self) -> (&str, u16) {
        if self.tx_address.is_empty() {
            (&self.rx_address, self.rx_port)
        } else {
            let port = if self.tx_port == 0 {
                self.rx_port
            } else {
                self.tx_port
            };
            (&self.tx_address, port)
        }
    }

    pub fn is_presence(&self) -> bool {
        self.group_type == GroupType::Presence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupConfig {
        let mut g = GroupConfig::new(GroupType::Audio, "Command Net");
        g.id = GroupId::from("g-001");
        g.use_crypto = true;
        g.crypto_password = "deadbeef".into();
        g.rx_address = "239.42.10.1".into();
        g.rx_port = 49000;
        g.tx_codec_id = 25;
        g.tx_framing_ms = 60;
        g.full_duplex = false;
        g.max_tx_secs = 120;
        g
    }

    #[test]
    fn json_round_trip_is_field_equal() {
        let g = sample();
        let json = g.to_json().unwrap();
        let back = GroupConfig::from_json(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn wire_field_names_are_underscore_prefixed() {
        let json = sample().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["_id"], "g-001");
        assert_eq!(v["_type"], 1);
        assert_eq!(v["_rxPort"], 49000);
        assert_eq!(v["_useCrypto"], true);
    }

    #[test]
    fn tx_endpoint_defaults_to_rx() {
        let g = sample();
        assert_eq!(g.tx_endpoint(), ("239.42.10.1", 49000));

        let mut g2 = sample();
        g2.tx_address = "239.42.10.2".into();
        g2.tx_port = 49002;
        assert_eq!(g2.tx_endpoint(), ("239.42.10.2", 49002));

        // Address set but port left at zero: keep the rx port.
        let mut g3 = sample();
        g3.tx_address = "239.42.10.3".into();
        assert_eq!(g3.tx_endpoint(), ("239.42.10.3", 49000));
    }

    #[test]
    fn malformed_json_rejects_whole_record() {
        assert!(GroupConfig::from_json("{not json").is_err());
        // Well-formed but missing the mandatory id.
        assert!(GroupConfig::from_json(r#"{"_type":1}"#).is_err());
        assert!(matches!(
            GroupConfig::from_json(r#"{"_id":"","_type":1}"#),
            Err(ConfigError::EmptyGroupId)
        ));
    }

    #[test]
    fn unset_fields_take_defaults() {
        let g = GroupConfig::from_json(r#"{"_id":"g-9","_type":3}"#).unwrap();
        assert_eq!(g.group_type, GroupType::Raw);
        assert!(!g.use_crypto);
        assert_eq!(g.rx_port, 0);
        assert!(g.name.is_empty());
    }
}
