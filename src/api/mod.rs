//! HTTP API for quietspot.
//!
//! Exposes the reading store and quiet-spot aggregator over three routes:
//!
//! - `GET /health` - liveness and stored reading count
//! - `POST /noise` - submit a reading (`{lat, lng, dBA}`)
//! - `GET /spots` - ranked quiet spots, ascending average dBA

pub mod handlers;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::ReadingStore;

/// Shared state for request handlers.
#[derive(Debug)]
pub struct AppState {
    /// The reading store.
    pub store: ReadingStore,
    /// Maximum number of spots returned by `/spots`.
    pub spot_limit: usize,
}

/// Build the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/noise", post(handlers::submit_noise))
        .route("/spots", get(handlers::spots))
        .with_state(state)
}

/// Open the store and serve the HTTP API until the process is stopped.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the store's parent
/// directory cannot be created, or the listener fails.
pub async fn serve(config: &Config) -> Result<()> {
    let store = ReadingStore::open(config.data_path())?;
    let state = Arc::new(AppState {
        store,
        spot_limit: config.server.spot_limit,
    });

    let mut app = router(state);

    if config.server.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }
    app = app.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .map_err(|source| Error::AddrParse {
            addr: config.bind_addr(),
            source,
        })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("QuietSpot API (file storage) on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
