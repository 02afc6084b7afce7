// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Router metrics snapshot
//!
//! Collects system resources, interface traffic, connection tracking and
//! DHCP lease totals in one session and stores them as a timestamped JSON
//! file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::RouterConfig;
use crate::error::{AppError, ExportFailure, Result};
use crate::mikrotik::{
    ConnectionSummary, DhcpSummary, InterfaceStats, RouterError, RouterSession, SystemResource,
};
use crate::report::write_unique;

/// Interface types left out of the snapshot
const SKIPPED_INTERFACE_TYPES: [&str; 3] = ["bridge", "vlan", "ppp"];

/// Value of the snapshot's `source` field
const SNAPSHOT_SOURCE: &str = "mikrotik-status";

/// DHCP totals, or a marker when the router has no DHCP server package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DhcpData {
    Available(DhcpSummary),
    Unavailable { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotData {
    pub system: SystemResource,
    pub interfaces: Vec<InterfaceStats>,
    pub connections: ConnectionSummary,
    pub dhcp: DhcpData,
}

/// One metrics snapshot as written to disk
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub router: String,
    pub data: SnapshotData,
}

impl MetricsSnapshot {
    /// File name stamp, UTC `%Y%m%d_%H%M%S`
    pub fn stamp(&self) -> String {
        self.timestamp.format("%Y%m%d_%H%M%S").to_string()
    }
}

/// Drops bridge, VLAN and PPP interfaces; other types are kept as is
pub fn physical_interfaces(interfaces: Vec<InterfaceStats>) -> Vec<InterfaceStats> {
    interfaces
        .into_iter()
        .filter(|i| !SKIPPED_INTERFACE_TYPES.contains(&i.kind.as_str()))
        .collect()
}

/// Queries everything the snapshot needs over an open session
pub async fn collect_snapshot(session: &mut RouterSession, router: &str) -> Result<MetricsSnapshot> {
    tracing::info!("Collecting system resources...");
    let system = session.system_resource().await?;

    tracing::info!("Collecting interface statistics...");
    let interfaces = physical_interfaces(session.interfaces().await?);

    tracing::info!("Collecting connection data...");
    let connections = session.connections().await?;

    let dhcp = match session.dhcp_leases().await {
        Ok(summary) => DhcpData::Available(summary),
        // The router answered: the DHCP server is just not there
        Err(RouterError::Trap(msg)) => {
            tracing::warn!("DHCP leases not available: {}", msg);
            DhcpData::Unavailable {
                error: "Not available".to_string(),
            }
        }
        Err(e) => return Err(e.into()),
    };

    Ok(MetricsSnapshot {
        timestamp: Utc::now(),
        source: SNAPSHOT_SOURCE.to_string(),
        router: router.to_string(),
        data: SnapshotData {
            system,
            interfaces,
            connections,
            dhcp,
        },
    })
}

/// Writes `metrics_<stamp>.json` into `dir`
pub async fn save_snapshot(snapshot: &MetricsSnapshot, dir: &Path) -> Result<PathBuf> {
    let body = serde_json::to_string_pretty(snapshot)?;
    write_unique(dir, "metrics", &snapshot.stamp(), body.as_bytes())
        .await
        .map_err(|source| {
            tracing::error!("Failed to write snapshot in {}: {}", dir.display(), source);
            AppError::Export {
                failures: vec![ExportFailure {
                    path: dir.to_path_buf(),
                    source,
                }],
            }
        })
}

/// Opens a session, collects one snapshot and saves it
pub async fn run(router: &RouterConfig, dir: &Path) -> Result<(MetricsSnapshot, PathBuf)> {
    let mut session = RouterSession::open(router).await?;
    let collected = collect_snapshot(&mut session, &router.host).await;
    session.close().await;
    let snapshot = collected?;

    let path = save_snapshot(&snapshot, dir).await?;
    tracing::info!("Metrics saved to {}", path.display());
    Ok((snapshot, path))
}
