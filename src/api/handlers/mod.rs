// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod metrics;
mod status;

pub use health::{HealthResponse, health_check};
pub use metrics::metrics_handler;
pub use status::status_json;

use std::path::Path;

use crate::error::Result;
use crate::report::StatusReport;

/// Reads the last written report; `None` while `monitor` has not run yet
pub(crate) async fn read_report(path: &Path) -> Result<Option<StatusReport>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
