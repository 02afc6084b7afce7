// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Customer status report
//!
//! The report is the JSON document the dashboard reads. Field names on the
//! wire follow the dashboard contract (`last_updated`, `customers`,
//! `summary`, `system_info`).

mod aggregate;
mod export;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use aggregate::{availability_percent, build_report};
pub use export::{export_report, write_unique};

/// Customer state after joining the roster with netwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HostStatus {
    Up,
    Down,
    /// No netwatch entry for the customer's IP
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerStatus {
    #[serde(rename = "no")]
    pub sequence_number: u32,
    pub name: String,
    pub ip: String,
    pub status: HostStatus,
    pub comment: String,
    pub last_down: String,
    pub last_up: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "total_customers")]
    pub total: usize,
    #[serde(rename = "online_customers")]
    pub online: usize,
    #[serde(rename = "offline_customers")]
    pub offline: usize,
    #[serde(rename = "unknown_customers", default)]
    pub unknown: usize,
    pub availability_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub checked_at: String,
    pub total_checked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(rename = "last_updated")]
    pub generated_at: DateTime<Local>,
    pub customers: Vec<CustomerStatus>,
    pub summary: Summary,
    pub system_info: SystemInfo,
}

impl StatusReport {
    pub fn offline_customers(&self) -> impl Iterator<Item = &CustomerStatus> {
        self.customers
            .iter()
            .filter(|c| c.status == HostStatus::Down)
    }

    /// Pretty JSON, two-space indent, non-ASCII kept as is
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> StatusReport {
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        StatusReport {
            generated_at: at,
            customers: vec![CustomerStatus {
                sequence_number: 1,
                name: "Warung Bu Sri".to_string(),
                ip: "10.10.1.2".to_string(),
                status: HostStatus::Up,
                comment: "Pelanggan Ñ".to_string(),
                last_down: String::new(),
                last_up: "mar/01/2025 09:00:00".to_string(),
            }],
            summary: Summary {
                total: 1,
                online: 1,
                offline: 0,
                unknown: 0,
                availability_percent: 100.0,
            },
            system_info: SystemInfo {
                checked_at: "2025-03-01 09:30:00".to_string(),
                total_checked: 1,
            },
        }
    }

    #[test]
    fn test_json_uses_dashboard_keys() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert!(json.get("last_updated").is_some());
        assert_eq!(json["customers"][0]["no"], 1);
        assert_eq!(json["customers"][0]["status"], "UP");
        assert_eq!(json["summary"]["total_customers"], 1);
        assert_eq!(json["summary"]["online_customers"], 1);
        assert_eq!(json["summary"]["offline_customers"], 0);
        assert_eq!(json["summary"]["availability_percent"], 100.0);
        assert_eq!(json["system_info"]["checked_at"], "2025-03-01 09:30:00");
    }

    #[test]
    fn test_json_keeps_non_ascii_literal() {
        let text = sample().to_json().unwrap();
        assert!(text.contains("Pelanggan Ñ"));
        assert!(!text.contains("\\u00d1"));
    }

    #[test]
    fn test_json_is_indented() {
        let text = sample().to_json().unwrap();
        assert!(text.starts_with("{\n  \"last_updated\""));
    }

    #[test]
    fn test_report_reads_back() {
        let report = sample();
        let parsed: StatusReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.customers, report.customers);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HostStatus::Unknown).unwrap(),
            "\"UNKNOWN\""
        );
        assert_eq!(
            serde_json::from_str::<HostStatus>("\"DOWN\"").unwrap(),
            HostStatus::Down
        );
    }
}
