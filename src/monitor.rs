// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Netwatch monitoring run: roster → router → report → files

use chrono::Local;
use std::fmt;
use std::path::PathBuf;

use crate::config::{Config, RouterConfig, load_roster};
use crate::error::{AppError, Result};
use crate::mikrotik::fetch_netwatch_status;
use crate::report::{StatusReport, build_report, export_report};

/// How many offline customers the console summary lists by name
const OFFLINE_PREVIEW: usize = 5;

/// Result of a successful monitoring run
#[derive(Debug)]
pub struct MonitorOutcome {
    pub report: StatusReport,
    pub written: Vec<PathBuf>,
}

/// Runs one monitoring pass.
///
/// Stops at the first fatal condition: unreadable roster, unreachable
/// router, an empty netwatch table, or a failed export.
pub async fn run(router: &RouterConfig, config: &Config) -> Result<MonitorOutcome> {
    let customers = load_roster(&config.customers_file).await?;
    tracing::info!("Loaded {} customers", customers.len());
    tracing::info!("Connecting to MikroTik {}", router.address());

    let netwatch = fetch_netwatch_status(router).await?;
    if netwatch.is_empty() {
        tracing::warn!("Router {} returned no netwatch entries", router.address());
        return Err(AppError::EmptyNetwatch {
            router: router.address(),
        });
    }
    tracing::info!("Got {} entries from Netwatch", netwatch.len());

    let report = build_report(&customers, &netwatch, Local::now());
    let written = export_report(&report, &config.output).await?;
    tracing::info!(
        "Status saved to {}",
        written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(MonitorOutcome { report, written })
}

/// Human-readable run summary for the console
pub struct ConsoleSummary<'a>(&'a StatusReport);

/// Wraps `report` for printing
pub fn render_summary(report: &StatusReport) -> ConsoleSummary<'_> {
    ConsoleSummary(report)
}

impl fmt::Display for ConsoleSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total customers  : {}", report.summary.total)?;
        writeln!(f, "Online           : {}", report.summary.online)?;
        writeln!(f, "Offline          : {}", report.summary.offline)?;
        if report.summary.unknown > 0 {
            writeln!(f, "Unknown          : {}", report.summary.unknown)?;
        }
        writeln!(f, "Availability     : {}%", report.summary.availability_percent)?;
        writeln!(f, "Last updated     : {}", report.generated_at.to_rfc3339())?;
        writeln!(f, "{rule}")?;

        let offline: Vec<_> = report.offline_customers().collect();
        if !offline.is_empty() {
            writeln!(f, "\nOFFLINE CUSTOMERS ({}):", offline.len())?;
            for c in offline.iter().take(OFFLINE_PREVIEW) {
                writeln!(f, "  {:2}. {} ({})", c.sequence_number, c.name, c.ip)?;
            }
            if offline.len() > OFFLINE_PREVIEW {
                writeln!(f, "  ... and {} more", offline.len() - OFFLINE_PREVIEW)?;
            }
        }
        Ok(())
    }
}
