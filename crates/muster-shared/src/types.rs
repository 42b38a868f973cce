use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Group identifier, unique within a mission.  The engine hands these back
// verbatim in every callback, so they stay strings end to end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl MissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for MissionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for MissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a remote node as reported in presence payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First 8 characters, for compact log lines.
    ///
    /// Node ids come from the engine and are not guaranteed ASCII, so the
    /// cut lands on a char boundary, never a byte offset.
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(8)
            .map_or(self.0.as_str(), |(i, _)| &self.0[..i])
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self(String::new())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group kind, serialized as the engine's numeric type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupType {
    /// Push-to-talk voice channel.
    Audio,
    /// Status/location broadcast channel.
    Presence,
    /// Arbitrary application data.
    Raw,
}

impl GroupType {
    pub fn code(self) -> i32 {
        match self {
            Self::Audio => 1,
            Self::Presence => 2,
            Self::Raw => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Audio),
            2 => Some(Self::Presence),
            3 => Some(Self::Raw),
            _ => None,
        }
    }
}

impl Serialize for GroupType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for GroupType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(d)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown group type code {code}")))
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Audio => "audio",
            Self::Presence => "presence",
            Self::Raw => "raw",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_type_codes_round_trip() {
        for t in [GroupType::Audio, GroupType::Presence, GroupType::Raw] {
            assert_eq!(GroupType::from_code(t.code()), Some(t));
        }
        assert_eq!(GroupType::from_code(0), None);
        assert_eq!(GroupType::from_code(42), None);
    }

    #[test]
    fn group_type_serializes_as_number() {
        let json = serde_json::to_string(&GroupType::Presence).unwrap();
        assert_eq!(json, "2");
        let back: GroupType = serde_json::from_str("1").unwrap();
        assert_eq!(back, GroupType::Audio);
        assert!(serde_json::from_str::<GroupType>("9").is_err());
    }

    #[test]
    fn node_id_short() {
        let id = NodeId::from("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
        let tiny = NodeId::from("ab");
        assert_eq!(tiny.short(), "ab");
    }

    #[test]
    fn node_id_short_handles_multibyte_ids() {
        // Byte 8 of this id falls inside a multi-byte char; a byte slice
        // would panic here.
        let id = NodeId::from("日本語ノード");
        assert_eq!(id.short(), "日本語ノード");

        let long = NodeId::from("αβγδεζηθικλ");
        assert_eq!(long.short(), "αβγδεζηθ");
        assert_eq!(long.short().chars().count(), 8);
    }
}
