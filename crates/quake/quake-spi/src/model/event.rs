//! Seismic event model

use crate::error::{QuakeError, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single catalog earthquake record.
///
/// A missing magnitude is carried as `NaN` so that loaders can hand every
/// row to the filter and let it count the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Origin time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Latitude in degrees, -90..=90
    pub latitude: f64,
    /// Longitude in degrees, -180..=180
    pub longitude: f64,
    /// Hypocenter depth in km (>= 0)
    pub depth: f64,
    /// Magnitude
    pub magnitude: f64,
}

impl Event {
    /// Create a new event.
    pub fn new(
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        depth: f64,
        magnitude: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            depth,
            magnitude,
        }
    }

    /// Check the record can take part in an analysis.
    pub fn validate(&self) -> Result<()> {
        let reason = if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            Some(MalformedReason::LatitudeOutOfRange)
        } else if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            Some(MalformedReason::LongitudeOutOfRange)
        } else if !self.magnitude.is_finite() {
            Some(MalformedReason::InvalidMagnitude)
        } else if !self.depth.is_finite() || self.depth < 0.0 {
            Some(MalformedReason::InvalidDepth)
        } else {
            None
        };

        match reason {
            Some(reason) => Err(QuakeError::MalformedEvent { reason }),
            None => Ok(()),
        }
    }

    /// Whether [`Event::validate`] passes.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    /// Calendar month of the origin time (1..=12)
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }
}

/// Why a catalog record was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    LatitudeOutOfRange,
    LongitudeOutOfRange,
    InvalidMagnitude,
    InvalidDepth,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MalformedReason::LatitudeOutOfRange => "latitude out of range",
            MalformedReason::LongitudeOutOfRange => "longitude out of range",
            MalformedReason::InvalidMagnitude => "missing or non-numeric magnitude",
            MalformedReason::InvalidDepth => "invalid depth",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_event() {
        let event = Event::new(at(2020, 5, 1), 35.0, 139.0, 10.0, 5.2);
        assert!(event.validate().is_ok());
        assert!(event.is_well_formed());
        assert_eq!(event.month(), 5);
    }

    #[test]
    fn test_coordinate_bounds_are_inclusive() {
        assert!(Event::new(at(2020, 1, 1), 90.0, 180.0, 0.0, 4.0).is_well_formed());
        assert!(Event::new(at(2020, 1, 1), -90.0, -180.0, 0.0, 4.0).is_well_formed());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let event = Event::new(at(2020, 1, 1), 91.0, 0.0, 10.0, 4.5);
        assert_eq!(
            event.validate(),
            Err(QuakeError::MalformedEvent {
                reason: MalformedReason::LatitudeOutOfRange
            })
        );
    }

    #[test]
    fn test_longitude_out_of_range() {
        let event = Event::new(at(2020, 1, 1), 0.0, -180.5, 10.0, 4.5);
        assert_eq!(
            event.validate(),
            Err(QuakeError::MalformedEvent {
                reason: MalformedReason::LongitudeOutOfRange
            })
        );
    }

    #[test]
    fn test_missing_magnitude() {
        let event = Event::new(at(2020, 1, 1), 0.0, 0.0, 10.0, f64::NAN);
        assert_eq!(
            event.validate(),
            Err(QuakeError::MalformedEvent {
                reason: MalformedReason::InvalidMagnitude
            })
        );
    }

    #[test]
    fn test_negative_depth() {
        let event = Event::new(at(2020, 1, 1), 0.0, 0.0, -1.0, 4.0);
        assert!(!event.is_well_formed());
    }

    #[test]
    fn test_nan_coordinates() {
        let event = Event::new(at(2020, 1, 1), f64::NAN, 0.0, 10.0, 4.0);
        assert!(!event.is_well_formed());
    }

    #[test]
    fn test_serde_roundtrip_keeps_timestamp() {
        let event = Event::new(at(2011, 3, 11), 38.3, 142.4, 29.0, 9.1);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("2011-03-11T00:00:00Z"));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
