// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS response parsing helpers

use super::Sentence;
use crate::mikrotik::types::{
    ConnectionSummary, DhcpSummary, InterfaceStats, NetwatchEntry, NetwatchMap, NetwatchState,
    SystemHealth, SystemResource,
};
use std::collections::HashMap;

fn number(s: &Sentence, key: &str) -> u64 {
    s.get(key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn text(s: &Sentence, key: &str) -> String {
    s.get(key).cloned().unwrap_or_default()
}

pub(crate) fn parse_system(sentences: &[Sentence]) -> SystemResource {
    let first_opt = sentences.iter().find(|s| s.contains_key("version"));
    let empty = HashMap::new();
    let first = first_opt.unwrap_or(&empty);
    SystemResource {
        cpu_load: number(first, "cpu-load"),
        free_memory: number(first, "free-memory"),
        total_memory: number(first, "total-memory"),
        free_hdd_space: number(first, "free-hdd-space"),
        total_hdd_space: number(first, "total-hdd-space"),
        uptime: first
            .get("uptime")
            .cloned()
            .unwrap_or_else(|| "0s".to_string()),
        version: first
            .get("version")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string()),
        board_name: first
            .get("board-name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string()),
        architecture_name: first
            .get("architecture-name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

pub(crate) fn parse_interfaces(sentences: &[Sentence]) -> Vec<InterfaceStats> {
    let mut out = Vec::new();
    for s in sentences {
        if let Some(name) = s.get("name") {
            out.push(InterfaceStats {
                name: name.clone(),
                kind: text(s, "type"),
                rx_bytes: number(s, "rx-byte"),
                tx_bytes: number(s, "tx-byte"),
                running: s.get("running").is_some_and(|v| v == "true"),
            });
        }
    }
    out
}

pub(crate) fn parse_identity(sentences: &[Sentence]) -> Option<String> {
    sentences.iter().find_map(|s| s.get("name").cloned())
}

/// Builds the host -> entry map. Rows without a host are skipped and a
/// repeated host keeps the last row seen.
pub(crate) fn parse_netwatch(sentences: &[Sentence]) -> NetwatchMap {
    let mut out = NetwatchMap::new();
    for s in sentences {
        let Some(host) = s.get("host").filter(|h| !h.is_empty()) else {
            continue;
        };
        let status = if s.get("status").is_some_and(|v| v == "up") {
            NetwatchState::Up
        } else {
            NetwatchState::Down
        };
        out.insert(
            host.clone(),
            NetwatchEntry {
                host: host.clone(),
                status,
                last_up: text(s, "last-up"),
                last_down: text(s, "last-down"),
                comment: text(s, "comment"),
            },
        );
    }
    out
}

pub(crate) fn summarize_connections(sentences: &[Sentence]) -> ConnectionSummary {
    let mut summary = ConnectionSummary::default();
    for s in sentences {
        summary.total += 1;
        match s.get("protocol").map(String::as_str) {
            Some("tcp") => summary.tcp += 1,
            Some("udp") => summary.udp += 1,
            _ => {}
        }
    }
    summary
}

pub(crate) fn parse_dhcp_leases(sentences: &[Sentence]) -> DhcpSummary {
    DhcpSummary {
        total_leases: sentences.len() as u64,
        active_leases: sentences
            .iter()
            .filter(|s| s.get("status").is_some_and(|v| v == "bound"))
            .count() as u64,
    }
}

/// Handles both the v6 single-row layout and the v7 `name`/`value` rows
pub(crate) fn parse_health(sentences: &[Sentence]) -> SystemHealth {
    let mut health = SystemHealth::default();
    for s in sentences {
        if let (Some(name), Some(value)) = (s.get("name"), s.get("value")) {
            match name.as_str() {
                "temperature" | "cpu-temperature" if health.temperature.is_none() => {
                    health.temperature = Some(value.clone());
                }
                "voltage" => health.voltage = Some(value.clone()),
                _ => {}
            }
            continue;
        }
        if let Some(t) = s.get("temperature") {
            health.temperature = Some(t.clone());
        }
        if let Some(v) = s.get("voltage") {
            health.voltage = Some(v.clone());
        }
    }
    health
}
