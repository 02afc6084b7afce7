use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether a status report has been written yet
    pub report_available: bool,
}

/// GET /health
///
/// Always "ok" while the server runs; `report_available` tells whether
/// `monitor` has produced anything to serve.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let report_available = tokio::fs::try_exists(&state.output.primary)
        .await
        .unwrap_or(false);
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        report_available,
    };

    (StatusCode::OK, Json(response))
}
