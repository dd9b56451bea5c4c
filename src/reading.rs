//! Core reading types for quietspot.
//!
//! This module defines the fundamental data structure for a single geotagged
//! ambient-noise measurement and the validation rules applied at ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single geotagged ambient-noise measurement.
///
/// Readings are immutable once created: the store never mutates or deletes
/// them, and the timestamp is assigned at ingestion time rather than taken
/// from the client.
///
/// The serialized form matches the wire and on-disk format exactly:
/// `{"lat": n, "lng": n, "dBA": n, "at": "<RFC 3339>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Latitude in decimal degrees, in [-90, 90].
    pub lat: f64,

    /// Longitude in decimal degrees, in [-180, 180].
    pub lng: f64,

    /// Sound pressure level in dBA.
    #[serde(rename = "dBA")]
    pub dba: f64,

    /// When this reading was ingested.
    pub at: DateTime<Utc>,
}

impl Reading {
    /// Create a new reading stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any field is non-finite or the
    /// coordinates are out of range.
    pub fn new(lat: f64, lng: f64, dba: f64) -> Result<Self> {
        Self::validate(lat, lng, dba)?;
        Ok(Self {
            lat,
            lng,
            dba,
            at: Utc::now(),
        })
    }

    /// Validate reading fields without constructing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(lat: f64, lng: f64, dba: f64) -> Result<()> {
        if !lat.is_finite() {
            return Err(Error::validation("lat must be a finite number"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::validation(format!(
                "lat {lat} out of range [-90, 90]"
            )));
        }
        if !lng.is_finite() {
            return Err(Error::validation("lng must be a finite number"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(Error::validation(format!(
                "lng {lng} out of range [-180, 180]"
            )));
        }
        if !dba.is_finite() {
            return Err(Error::validation("dBA must be a finite number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_reading() {
        let reading = Reading::new(40.71, -74.00, 55.0).unwrap();
        assert_eq!(reading.lat, 40.71);
        assert_eq!(reading.lng, -74.00);
        assert_eq!(reading.dba, 55.0);
    }

    #[test]
    fn test_new_stamps_recent_timestamp() {
        let before = Utc::now();
        let reading = Reading::new(0.0, 0.0, 40.0).unwrap();
        let after = Utc::now();
        assert!(reading.at >= before);
        assert!(reading.at <= after);
    }

    #[test]
    fn test_validate_rejects_nan_lat() {
        let result = Reading::new(f64::NAN, 0.0, 40.0);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_infinite_dba() {
        let result = Reading::new(0.0, 0.0, f64::INFINITY);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("dBA"));
    }

    #[test]
    fn test_validate_rejects_lat_out_of_range() {
        assert!(Reading::new(90.01, 0.0, 40.0).is_err());
        assert!(Reading::new(-90.01, 0.0, 40.0).is_err());
    }

    #[test]
    fn test_validate_rejects_lng_out_of_range() {
        assert!(Reading::new(0.0, 180.5, 40.0).is_err());
        assert!(Reading::new(0.0, -180.5, 40.0).is_err());
    }

    #[test]
    fn test_validate_accepts_boundary_coordinates() {
        assert!(Reading::new(90.0, 180.0, 40.0).is_ok());
        assert!(Reading::new(-90.0, -180.0, 40.0).is_ok());
    }

    #[test]
    fn test_validate_accepts_negative_dba() {
        // dBA has no range restriction, only finiteness.
        assert!(Reading::new(0.0, 0.0, -10.0).is_ok());
    }

    #[test]
    fn test_serialize_uses_wire_field_names() {
        let reading = Reading::new(40.71, -74.00, 55.0).unwrap();
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["lat"], 40.71);
        assert_eq!(json["lng"], -74.00);
        assert_eq!(json["dBA"], 55.0);
        assert!(json["at"].is_string());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let reading = Reading::new(51.5074, -0.1278, 62.5).unwrap();
        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_deserialize_rejects_string_dba() {
        let json = r#"{"lat": 1.0, "lng": 2.0, "dBA": "55", "at": "2026-01-01T00:00:00Z"}"#;
        let result: std::result::Result<Reading, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
