// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::AppState;

/// GET /data/status.json
///
/// Serves the primary status file byte for byte so the dashboard sees
/// exactly what `monitor` wrote.
pub async fn status_json(State(state): State<Arc<AppState>>) -> Response {
    let path = &state.output.primary;
    match tokio::fs::read(path).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} not written yet", path.display());
            (StatusCode::NOT_FOUND, "No status report yet").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read status report: {}", e),
            )
                .into_response()
        }
    }
}
