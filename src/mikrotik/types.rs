// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Typed results of RouterOS queries

use serde::Serialize;
use std::collections::HashMap;

/// Netwatch probe state as reported by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetwatchState {
    Up,
    Down,
}

/// One `/tool/netwatch` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetwatchEntry {
    pub host: String,
    pub status: NetwatchState,
    pub last_up: String,
    pub last_down: String,
    pub comment: String,
}

/// Netwatch entries keyed by host IP, exactly as the router spells it
pub type NetwatchMap = HashMap<String, NetwatchEntry>;

/// System resource information from a `MikroTik` router
#[derive(Debug, Clone, Serialize)]
pub struct SystemResource {
    pub cpu_load: u64,
    pub free_memory: u64,
    pub total_memory: u64,
    #[serde(rename = "free_hdd")]
    pub free_hdd_space: u64,
    #[serde(rename = "total_hdd")]
    pub total_hdd_space: u64,
    pub uptime: String,
    pub version: String,
    pub board_name: String,
    #[serde(skip)]
    pub architecture_name: String,
}

/// Statistics for a network interface
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceStats {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    #[serde(rename = "status")]
    pub running: bool,
}

/// Connection tracking totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionSummary {
    pub total: u64,
    pub tcp: u64,
    pub udp: u64,
}

/// DHCP server lease totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DhcpSummary {
    pub total_leases: u64,
    pub active_leases: u64,
}

/// `/system/health` readings; older boards report only some of them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemHealth {
    pub temperature: Option<String>,
    pub voltage: Option<String>,
}
