//! Reported node location, with post-parse validation.

use serde::{Deserialize, Serialize};

/// A location sample from a presence payload.
///
/// Engine payloads are not trusted here: some device integrations report
/// garbage coordinates (out-of-range fixes, negative speeds) and an invalid
/// location is dropped from the descriptor rather than failing the whole
/// presence update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Bearing in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<f64>,
}

impl Location {
    /// A location is acceptable when every present field is finite and in
    /// its physical range.
    pub fn is_valid(&self) -> bool {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return false;
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return false;
        }
        if let Some(alt) = self.altitude {
            if !alt.is_finite() {
                return false;
            }
        }
        if let Some(speed) = self.speed {
            if !speed.is_finite() || speed < 0.0 {
                return false;
            }
        }
        if let Some(dir) = self.direction {
            if !dir.is_finite() || !(0.0..=360.0).contains(&dir) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lon: f64) -> Location {
        Location {
            latitude: lat,
            longitude: lon,
            altitude: None,
            speed: None,
            direction: None,
        }
    }

    #[test]
    fn accepts_in_range_fix() {
        assert!(loc(51.5, -0.12).is_valid());
        assert!(loc(-90.0, 180.0).is_valid());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(!loc(200.0, 0.0).is_valid());
        assert!(!loc(0.0, -181.0).is_valid());
        assert!(!loc(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn rejects_bad_optional_fields() {
        let mut l = loc(10.0, 10.0);
        l.speed = Some(-3.0);
        assert!(!l.is_valid());

        let mut l = loc(10.0, 10.0);
        l.direction = Some(400.0);
        assert!(!l.is_valid());

        let mut l = loc(10.0, 10.0);
        l.altitude = Some(f64::INFINITY);
        assert!(!l.is_valid());
    }
}
