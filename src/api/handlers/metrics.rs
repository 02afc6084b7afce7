use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::read_report;
use crate::api::AppState;
use crate::metrics::StatusMetrics;

const OPENMETRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    tracing::debug!("/metrics encode from {}", state.output.primary.display());
    let report = match read_report(&state.output.primary).await {
        Ok(Some(report)) => report,
        Ok(None) => return (StatusCode::NOT_FOUND, "No status report yet").into_response(),
        Err(e) => {
            tracing::error!("Failed to load status report: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load status report: {}", e),
            )
                .into_response();
        }
    };

    match StatusMetrics::from_report(&report).encode() {
        Ok(metrics_text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)],
            metrics_text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}
