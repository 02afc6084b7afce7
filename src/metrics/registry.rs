// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prometheus view of a status report

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::atomic::AtomicU64;

use super::labels::{CustomerLabels, StateLabels};
use crate::error::{AppError, Result};
use crate::report::{HostStatus, StatusReport};

/// Gauges describing one status report.
///
/// Built fresh from each report, so customers that left the roster never
/// linger as stale series.
pub struct StatusMetrics {
    registry: Registry,
}

impl StatusMetrics {
    pub fn from_report(report: &StatusReport) -> Self {
        let mut registry = Registry::default();

        let customer_up = Family::<CustomerLabels, Gauge>::default();
        registry.register(
            "mikrotik_netwatch_customer_up",
            "Netwatch state per customer (1=up,0=down); customers without an entry are omitted",
            customer_up.clone(),
        );
        let customers = Family::<StateLabels, Gauge>::default();
        registry.register(
            "mikrotik_netwatch_customers",
            "Customers by state (online, offline, unknown)",
            customers.clone(),
        );
        let roster_size = Gauge::<i64>::default();
        registry.register(
            "mikrotik_netwatch_roster_size",
            "Customers in the roster",
            roster_size.clone(),
        );
        let availability = Gauge::<f64, AtomicU64>::default();
        registry.register(
            "mikrotik_netwatch_availability_percent",
            "Share of roster customers reported up",
            availability.clone(),
        );
        let generated_at = Gauge::<i64>::default();
        registry.register(
            "mikrotik_netwatch_report_timestamp_seconds",
            "Unix time the report was generated",
            generated_at.clone(),
        );

        for c in &report.customers {
            let value = match c.status {
                HostStatus::Up => 1,
                HostStatus::Down => 0,
                HostStatus::Unknown => continue,
            };
            customer_up.get_or_create(&CustomerLabels::from(c)).set(value);
        }

        #[allow(clippy::cast_possible_wrap)]
        {
            customers
                .get_or_create(&StateLabels::new("online"))
                .set(report.summary.online as i64);
            customers
                .get_or_create(&StateLabels::new("offline"))
                .set(report.summary.offline as i64);
            customers
                .get_or_create(&StateLabels::new("unknown"))
                .set(report.summary.unknown as i64);
            roster_size.set(report.summary.total as i64);
        }
        availability.set(report.summary.availability_percent);
        generated_at.set(report.generated_at.timestamp());

        Self { registry }
    }

    pub fn encode(&self) -> Result<String> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry).map_err(|e| AppError::Metrics(e.to_string()))?;
        Ok(buffer)
    }
}
