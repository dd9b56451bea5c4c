//! Wire request/response types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::aggregate::QuietSpot;
use crate::reading::Reading;

/// Body of a `POST /noise` submission.
///
/// All three fields are required numbers; serde rejects anything else and the
/// handler surfaces that as a 400.
#[derive(Debug, Clone, Deserialize)]
pub struct NoiseSubmission {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Sound pressure level in dBA.
    #[serde(rename = "dBA")]
    pub dba: f64,
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always true when the service is up.
    pub ok: bool,
    /// Service name.
    pub service: &'static str,
    /// Storage backend identifier.
    pub storage: &'static str,
    /// Number of readings currently stored.
    pub items: usize,
}

/// Response for a successful `POST /noise`.
#[derive(Debug, Clone, Serialize)]
pub struct SavedResponse {
    /// Always true on success.
    pub ok: bool,
    /// The reading as persisted, including the assigned timestamp.
    pub saved: Reading,
}

/// Response for `GET /spots`.
#[derive(Debug, Clone, Serialize)]
pub struct SpotsResponse {
    /// Always true on success.
    pub ok: bool,
    /// Ranked quiet spots, ascending average dBA.
    pub spots: Vec<QuietSpot>,
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always false on failure.
    pub ok: bool,
    /// Human-readable description of the failure.
    pub error: String,
}

impl ErrorResponse {
    /// Build an error body from any displayable error.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_deserializes_wire_names() {
        let json = r#"{"lat": 40.71, "lng": -74.0, "dBA": 55.0}"#;
        let sub: NoiseSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.lat, 40.71);
        assert_eq!(sub.lng, -74.0);
        assert_eq!(sub.dba, 55.0);
    }

    #[test]
    fn test_submission_rejects_missing_field() {
        let json = r#"{"lat": 40.71, "lng": -74.0}"#;
        assert!(serde_json::from_str::<NoiseSubmission>(json).is_err());
    }

    #[test]
    fn test_submission_rejects_non_numeric_field() {
        let json = r#"{"lat": 40.71, "lng": -74.0, "dBA": "loud"}"#;
        assert!(serde_json::from_str::<NoiseSubmission>(json).is_err());
    }

    #[test]
    fn test_health_response_shape() {
        let resp = HealthResponse {
            ok: true,
            service: "quietspot",
            storage: "file",
            items: 3,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["service"], "quietspot");
        assert_eq!(json["storage"], "file");
        assert_eq!(json["items"], 3);
    }

    #[test]
    fn test_saved_response_embeds_reading() {
        let reading = Reading::new(40.71, -74.0, 55.0).unwrap();
        let resp = SavedResponse {
            ok: true,
            saved: reading,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["saved"]["dBA"], 55.0);
        assert!(json["saved"]["at"].is_string());
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("lat, lng, dBA (numbers) required"))
            .unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "lat, lng, dBA (numbers) required");
    }
}
