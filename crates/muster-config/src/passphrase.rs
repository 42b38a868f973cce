//! Mission generation from a shared passphrase.
//!
//! Two users who type the same passphrase derive the same mission: same id,
//! same multicast addresses and ports, same per-group crypto passwords.  That
//! lets a team stand up an ad-hoc mission without exchanging a file.
//!
//! All derivation runs through BLAKE3 keyed hashing so the mapping is stable
//! across releases; changing any constant here is a breaking change to every
//! passphrase already in the field.

use muster_shared::{GroupId, GroupType, MissionId};
use uuid::Uuid;

use crate::error::{ConfigError, Result};
use crate::group::GroupConfig;
use crate::mission::MissionConfig;

const KDF_CONTEXT: &str = "muster mission-from-passphrase v1";

/// Derive a complete mission from `passphrase` with `audio_groups` voice
/// channels plus one presence group.
///
/// Addresses land in 239.42.0.0/16 (administratively scoped multicast);
/// ports are even and sit in the 49152+ dynamic range, leaving the odd
/// port free for RTCP.
pub fn mission_from_passphrase(passphrase: &str, audio_groups: usize) -> Result<MissionConfig> {
    if passphrase.trim().is_empty() {
        return Err(ConfigError::EmptyPassphrase);
    }

    let root = blake3::derive_key(KDF_CONTEXT, passphrase.trim().as_bytes());

    let mut mission = MissionConfig::new(suggested_name(&root));
    mission.id = MissionId(Uuid::from_slice(&root[..16]).expect("16 bytes").to_string());
    mission.description = format!("Generated from passphrase ({} audio groups)", audio_groups);

    // Group 0 is always the presence anchor.
    let mut presence = derive_group(&root, 0, GroupType::Presence, "Presence".to_string());
    presence.use_crypto = true;
    mission.groups.push(presence);

    for i in 0..audio_groups {
        let name = format!("Net {}", i + 1);
        let mut g = derive_group(&root, (i + 1) as u32, GroupType::Audio, name);
        g.use_crypto = true;
        g.tx_codec_id = 25; // Opus 8kbps, the product default
        g.tx_framing_ms = 60;
        g.max_tx_secs = 120;
        mission.groups.push(g);
    }

    mission.sync_anchor_fields();
    Ok(mission)
}

fn derive_group(root: &[u8; 32], index: u32, group_type: GroupType, name: String) -> GroupConfig {
    let mut hasher = blake3::Hasher::new_keyed(root);
    hasher.update(&index.to_le_bytes());
    let sub = hasher.finalize();
    let b = sub.as_bytes();

    let mut g = GroupConfig::new(group_type, name);
    g.id = GroupId(Uuid::from_slice(&b[..16]).expect("16 bytes").to_string());
    // Skip .0 and .255 in both host octets.
    g.rx_address = format!("239.42.{}.{}", 1 + (b[16] % 254), 1 + (b[17] % 254));
    g.rx_port = even_port(u16::from_le_bytes([b[18], b[19]]));
    g.crypto_password = hex::encode(&b[20..32]);
    g
}

/// Clamp into [49152, 65534] and force even.
fn even_port(raw: u16) -> u16 {
    (49152 + (raw % 16382)) & !1
}

/// Human-readable mission name derived from the root key.
fn suggested_name(root: &[u8; 32]) -> String {
    format!("MSN-{}", hex::encode(&root[28..32]).to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_passphrase_same_mission() {
        let a = mission_from_passphrase("red dawn", 3).unwrap();
        let b = mission_from_passphrase("red dawn", 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        let a = mission_from_passphrase("red dawn", 2).unwrap();
        let b = mission_from_passphrase("  red dawn  ", 2).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn different_passphrases_diverge() {
        let a = mission_from_passphrase("red dawn", 2).unwrap();
        let b = mission_from_passphrase("red dusk", 2).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.groups[0].rx_address, b.groups[0].rx_address);
    }

    #[test]
    fn shape_is_one_presence_plus_n_audio() {
        let m = mission_from_passphrase("test", 4).unwrap();
        assert_eq!(m.groups.len(), 5);
        assert_eq!(m.groups.iter().filter(|g| g.is_presence()).count(), 1);
        assert_eq!(m.mc_id, m.presence_anchor().unwrap().id.as_str());
    }

    #[test]
    fn ports_are_even_and_dynamic_range() {
        let m = mission_from_passphrase("port check", 8).unwrap();
        for g in &m.groups {
            assert_eq!(g.rx_port % 2, 0, "odd port for {}", g.id);
            assert!(g.rx_port >= 49152);
        }
    }

    #[test]
    fn empty_passphrase_is_rejected() {
        assert!(mission_from_passphrase("   ", 2).is_err());
    }
}
