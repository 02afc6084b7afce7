// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # MikroTik Status
//!
//! Customer availability monitor for MikroTik RouterOS devices.
//!
//! Reads the router's netwatch table over the RouterOS API, joins it with a
//! customer roster and publishes the result as JSON for a static dashboard.
//!
//! ## Main modules
//! - `api`: HTTP endpoints serving the latest report
//! - `collector`: one-shot router metrics snapshot
//! - `config`: environment configuration and the customer roster
//! - `diagnose`: API connection diagnostics
//! - `error`: error types and exit codes
//! - `metrics`: OpenMetrics rendering of a report
//! - `mikrotik`: RouterOS API client
//! - `monitor`: the fetch, aggregate, export pipeline
//! - `report`: report model, aggregation and file export
//! - `prelude`: commonly used types

mod api;
pub mod collector;
mod config;
pub mod diagnose;
mod error;
mod metrics;
mod mikrotik;
pub mod monitor;
pub mod prelude;
mod report;

// Re-export commonly used types
/// Application configuration and customer roster
pub use config::{Config, Customer, OutputConfig, RouterConfig, load_roster};

/// Application error, result type and exit codes
pub use error::{AppError, ExportFailure, Result, exit_code};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// OpenMetrics view of a report
pub use metrics::StatusMetrics;

/// RouterOS client and data types
pub use mikrotik::{
    ConnectionSummary, DhcpSummary, InterfaceStats, NetwatchEntry, NetwatchMap, NetwatchState,
    RouterError, RouterSession, SystemHealth, SystemResource, fetch_netwatch_status,
};

/// Status report model and its construction
pub use report::{
    CustomerStatus, HostStatus, StatusReport, Summary, SystemInfo, availability_percent,
    build_report, export_report,
};

/// RouterOS wire protocol primitives (public for tests)
pub use mikrotik::{encode_length, read_length, read_word, write_word};
