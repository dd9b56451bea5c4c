//! Request handlers for the HTTP API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, warn};

use super::models::{
    ErrorResponse, HealthResponse, NoiseSubmission, SavedResponse, SpotsResponse,
};
use super::AppState;
use crate::aggregate::rank_quiet_spots;
use crate::error::Error;

/// `GET /health` - service liveness plus the current reading count.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: "quietspot",
        storage: "file",
        items: state.store.len(),
    })
}

/// `POST /noise` - validate and persist a single noise reading.
///
/// Malformed bodies (missing or non-numeric fields) and out-of-range
/// coordinates are 400s; a failed durable write is a 500.
pub async fn submit_noise(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NoiseSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!("Rejected noise submission: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("lat, lng, dBA (numbers) required")),
            )
                .into_response();
        }
    };

    match state.store.append(submission.lat, submission.lng, submission.dba) {
        Ok(saved) => (StatusCode::CREATED, Json(SavedResponse { ok: true, saved })).into_response(),
        Err(err @ Error::Validation { .. }) => {
            warn!("Rejected noise submission: {}", err);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!("Failed to persist reading: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response()
        }
    }
}

/// `GET /spots` - ranked quiet spots, quietest first.
///
/// Recomputed from the full reading set on every call; nothing is cached.
pub async fn spots(State(state): State<Arc<AppState>>) -> Json<SpotsResponse> {
    let readings = state.store.all();
    let spots = rank_quiet_spots(&readings, state.spot_limit);
    info!(
        "Ranked {} spot(s) from {} reading(s)",
        spots.len(),
        readings.len()
    );
    Json(SpotsResponse { ok: true, spots })
}
