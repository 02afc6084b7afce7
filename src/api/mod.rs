// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API for the status dashboard
//!
//! # Endpoints
//! - `GET /health`: health check
//! - `GET /data/status.json`: latest status report as written by `monitor`
//! - `GET /metrics`: the same report in OpenMetrics format

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::config::OutputConfig;

/// Application state shared with endpoints
#[derive(Debug, Clone)]
pub struct AppState {
    pub output: OutputConfig,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/data/status.json", get(handlers::status_json))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_router() {
        let state = Arc::new(AppState {
            output: OutputConfig::default(),
        });

        let _router = create_router(state);
    }
}
