// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Joins the roster with netwatch results

use chrono::{DateTime, Local};

use super::{CustomerStatus, HostStatus, StatusReport, Summary, SystemInfo};
use crate::config::Customer;
use crate::mikrotik::{NetwatchMap, NetwatchState};

/// `round(online / total * 100, 2)`, or 0 for an empty roster.
///
/// Rounds the exact binary value half-to-even, so 1 of 32 gives 3.12.
#[allow(clippy::cast_precision_loss)]
pub fn availability_percent(online: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = online as f64 / total as f64 * 100.0;
    // `{:.2}` always yields a parseable decimal
    format!("{percent:.2}").parse().unwrap_or(percent)
}

/// Builds the report for one run.
///
/// IPs are matched as exact strings. Customers without a netwatch entry
/// are `UNKNOWN`: they count toward the total but not toward online or
/// offline. Rows are ordered by roster number (stable for duplicates).
pub fn build_report(
    customers: &[Customer],
    netwatch: &NetwatchMap,
    generated_at: DateTime<Local>,
) -> StatusReport {
    let mut online = 0;
    let mut offline = 0;
    let mut rows = Vec::with_capacity(customers.len());

    for customer in customers {
        let entry = netwatch.get(&customer.ip_address);
        let status = match entry.map(|e| e.status) {
            Some(NetwatchState::Up) => {
                online += 1;
                HostStatus::Up
            }
            Some(NetwatchState::Down) => {
                offline += 1;
                HostStatus::Down
            }
            None => HostStatus::Unknown,
        };

        rows.push(CustomerStatus {
            sequence_number: customer.sequence_number,
            name: customer.name.clone(),
            ip: customer.ip_address.clone(),
            status,
            comment: entry.map(|e| e.comment.clone()).unwrap_or_default(),
            last_down: entry.map(|e| e.last_down.clone()).unwrap_or_default(),
            last_up: entry.map(|e| e.last_up.clone()).unwrap_or_default(),
        });
    }

    rows.sort_by_key(|c| c.sequence_number);

    let total = customers.len();
    StatusReport {
        generated_at,
        customers: rows,
        summary: Summary {
            total,
            online,
            offline,
            unknown: total - online - offline,
            availability_percent: availability_percent(online, total),
        },
        system_info: SystemInfo {
            checked_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            total_checked: total,
        },
    }
}
