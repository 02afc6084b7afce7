//! `MikroTik` `RouterOS` API client module
//!
//! This module provides functionality to connect to `MikroTik` routers via the `RouterOS` API,
//! authenticate, and run the read-only queries the monitor, collector and
//! diagnostics need.

mod client;
mod connection;
mod error;
mod types;

// Re-export public types and functions
pub use client::{RouterSession, fetch_netwatch_status};
pub use connection::{encode_length, read_length, read_word, write_word};
pub use error::RouterError;
pub use types::{
    ConnectionSummary, DhcpSummary, InterfaceStats, NetwatchEntry, NetwatchMap, NetwatchState,
    SystemHealth, SystemResource,
};
