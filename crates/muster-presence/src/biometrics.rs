//! Accumulated biometric time series for a node.
//!
//! Biometric samples arrive as data-series blobs on a raw group, not as part
//! of the presence payload, and they deliberately survive presence churn: a
//! node dropping off the presence net and coming back keeps its history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Known biometric element codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub enum BiometricKind {
    HeartRate,
    SkinTemperature,
    CoreTemperature,
    Hydration,
    BloodOxygenation,
    FatigueLevel,
    TaskEffectiveness,
    StressLevel,
}

impl From<BiometricKind> for i32 {
    fn from(k: BiometricKind) -> i32 {
        match k {
            BiometricKind::HeartRate => 1,
            BiometricKind::SkinTemperature => 2,
            BiometricKind::CoreTemperature => 3,
            BiometricKind::Hydration => 4,
            BiometricKind::BloodOxygenation => 5,
            BiometricKind::FatigueLevel => 6,
            BiometricKind::TaskEffectiveness => 7,
            BiometricKind::StressLevel => 8,
        }
    }
}

impl TryFrom<i32> for BiometricKind {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::HeartRate),
            2 => Ok(Self::SkinTemperature),
            3 => Ok(Self::CoreTemperature),
            4 => Ok(Self::Hydration),
            5 => Ok(Self::BloodOxygenation),
            6 => Ok(Self::FatigueLevel),
            7 => Ok(Self::TaskEffectiveness),
            8 => Ok(Self::StressLevel),
            other => Err(format!("unknown biometric element code {other}")),
        }
    }
}

/// One sample: seconds relative to the series base timestamp, plus the
/// value.  Negative offsets occur when a later series re-bases samples that
/// predate the stored base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BiometricSample {
    #[serde(rename = "o")]
    pub offset_secs: i64,
    #[serde(rename = "v")]
    pub value: i32,
}

/// A decoded data series for one element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BiometricSeries {
    #[serde(rename = "t")]
    pub kind: BiometricKind,
    /// Unix timestamp the sample offsets are relative to.
    #[serde(rename = "ts")]
    pub base_timestamp: i64,
    #[serde(rename = "s", default)]
    pub samples: Vec<BiometricSample>,
}

/// Everything we have accumulated for one node, keyed by element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserBiometrics {
    series: HashMap<BiometricKind, BiometricSeries>,
}

impl UserBiometrics {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Fold an incoming series into the accumulated history for its element,
    /// creating the element entry on first use.
    pub fn merge_series(&mut self, incoming: BiometricSeries) {
        match self.series.get_mut(&incoming.kind) {
            Some(existing) => {
                // Re-base offsets so samples from different series stay
                // comparable against the original base timestamp.  A series
                // older than the stored base simply yields negative offsets.
                let shift = incoming.base_timestamp - existing.base_timestamp;
                for s in incoming.samples {
                    existing.samples.push(BiometricSample {
                        offset_secs: s.offset_secs + shift,
                        value: s.value,
                    });
                }
            }
            None => {
                self.series.insert(incoming.kind, incoming);
            }
        }
    }

    pub fn series_for(&self, kind: BiometricKind) -> Option<&BiometricSeries> {
        self.series.get(&kind)
    }

    /// Most recent value for an element, if any samples exist.
    pub fn latest(&self, kind: BiometricKind) -> Option<i32> {
        self.series
            .get(&kind)?
            .samples
            .iter()
            .max_by_key(|s| s.offset_secs)
            .map(|s| s.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(kind: BiometricKind, base: i64, samples: &[(i64, i32)]) -> BiometricSeries {
        BiometricSeries {
            kind,
            base_timestamp: base,
            samples: samples
                .iter()
                .map(|&(o, v)| BiometricSample {
                    offset_secs: o,
                    value: v,
                })
                .collect(),
        }
    }

    #[test]
    fn merge_creates_then_appends() {
        let mut bio = UserBiometrics::default();
        assert!(bio.is_empty());

        bio.merge_series(series(BiometricKind::HeartRate, 1000, &[(0, 60), (10, 65)]));
        bio.merge_series(series(BiometricKind::HeartRate, 1020, &[(0, 72)]));

        let hr = bio.series_for(BiometricKind::HeartRate).unwrap();
        assert_eq!(hr.samples.len(), 3);
        // The second series' sample was re-based onto the first's timestamp.
        assert_eq!(hr.samples[2].offset_secs, 20);
        assert_eq!(bio.latest(BiometricKind::HeartRate), Some(72));
    }

    #[test]
    fn older_series_keeps_negative_offsets() {
        let mut bio = UserBiometrics::default();
        bio.merge_series(series(BiometricKind::HeartRate, 1000, &[(0, 70)]));
        // A series based 30s earlier than the stored base: its samples must
        // land before the existing ones, not be clamped to offset 0.
        bio.merge_series(series(BiometricKind::HeartRate, 970, &[(0, 58), (10, 61)]));

        let hr = bio.series_for(BiometricKind::HeartRate).unwrap();
        assert_eq!(hr.samples[1].offset_secs, -30);
        assert_eq!(hr.samples[2].offset_secs, -20);
        // Latest is still the sample at the stored base, not the older ones.
        assert_eq!(bio.latest(BiometricKind::HeartRate), Some(70));
    }

    #[test]
    fn elements_are_independent() {
        let mut bio = UserBiometrics::default();
        bio.merge_series(series(BiometricKind::HeartRate, 0, &[(0, 61)]));
        bio.merge_series(series(BiometricKind::StressLevel, 0, &[(0, 2)]));

        assert_eq!(bio.latest(BiometricKind::HeartRate), Some(61));
        assert_eq!(bio.latest(BiometricKind::StressLevel), Some(2));
        assert_eq!(bio.latest(BiometricKind::Hydration), None);
    }

    #[test]
    fn series_json_uses_compact_field_names() {
        let s = series(BiometricKind::SkinTemperature, 500, &[(5, 31)]);
        let json = serde_json::to_string(&s).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["t"], 2);
        assert_eq!(v["ts"], 500);
        assert_eq!(v["s"][0]["o"], 5);
        assert_eq!(v["s"][0]["v"], 31);
    }
}
