//! Liveness probe
//!
//! Besides the usual status fields, reports how much of the library was
//! loaded at startup so a misconfigured root folder is easy to spot.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Songs in the catalog
    pub songs: usize,
    /// Playlists after resolution, "All Songs" included
    pub playlists: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        songs: state.library.catalog().len(),
        playlists: state.library.playlists().len(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
