// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Router API connection diagnostics

use clap::ValueEnum;
use std::fmt;

use crate::config::RouterConfig;
use crate::mikrotik::{RouterError, RouterSession};

/// How much of the API to exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiagnoseMode {
    /// TCP connect and login only
    Connect,
    /// Also read system resource, identity and interfaces
    #[default]
    Basic,
    /// Also read health, active users and CAPsMAN
    Full,
}

/// Outcome of one diagnostic query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed(Vec<String>),
    /// The router rejected an optional path (missing package, old version)
    NotAvailable(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub outcome: CheckOutcome,
}

/// Everything one diagnostic run found out
#[derive(Debug)]
pub struct DiagnosticReport {
    pub target: String,
    pub mode: DiagnoseMode,
    pub checks: Vec<Check>,
}

impl DiagnosticReport {
    pub fn passed(&self) -> bool {
        !self
            .checks
            .iter()
            .any(|c| matches!(c.outcome, CheckOutcome::Failed(_)))
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Target: {} (mode: {:?})", self.target, self.mode)?;
        for check in &self.checks {
            match &check.outcome {
                CheckOutcome::Passed(lines) => {
                    writeln!(f, "[ok]   {}", check.name)?;
                    for line in lines {
                        writeln!(f, "       {line}")?;
                    }
                }
                CheckOutcome::NotAvailable(msg) => {
                    writeln!(f, "[n/a]  {}: {msg}", check.name)?;
                }
                CheckOutcome::Failed(msg) => writeln!(f, "[FAIL] {}: {msg}", check.name)?,
            }
        }
        Ok(())
    }
}

fn required<T>(
    name: &'static str,
    result: Result<T, RouterError>,
    describe: impl FnOnce(T) -> Vec<String>,
) -> Check {
    let outcome = match result {
        Ok(value) => CheckOutcome::Passed(describe(value)),
        Err(e) => CheckOutcome::Failed(e.to_string()),
    };
    Check { name, outcome }
}

fn optional<T>(
    name: &'static str,
    result: Result<T, RouterError>,
    describe: impl FnOnce(T) -> Vec<String>,
) -> Check {
    let outcome = match result {
        Ok(value) => CheckOutcome::Passed(describe(value)),
        Err(RouterError::Trap(msg)) => CheckOutcome::NotAvailable(msg),
        Err(e) => CheckOutcome::Failed(e.to_string()),
    };
    Check { name, outcome }
}

/// Runs the checks for `mode`.
///
/// Failing to open the session is returned as an error so callers can
/// tell connectivity from authentication problems; failures of individual
/// queries are recorded in the report.
pub async fn run(
    router: &RouterConfig,
    mode: DiagnoseMode,
) -> Result<DiagnosticReport, RouterError> {
    let target = router.address();
    tracing::info!("Testing API on {} as {}", target, router.username);

    let mut session = RouterSession::open(router).await?;
    let mut checks = vec![Check {
        name: "login",
        outcome: CheckOutcome::Passed(vec![format!("user {}", router.username)]),
    }];

    if mode != DiagnoseMode::Connect {
        checks.push(required("system resource", session.system_resource().await, |r| {
            vec![
                format!("Board: {}", r.board_name),
                format!("Version: {}", r.version),
                format!("Architecture: {}", r.architecture_name),
                format!("Uptime: {}", r.uptime),
                format!("CPU load: {}%", r.cpu_load),
                format!("Free memory: {}", r.free_memory),
            ]
        }));
        checks.push(required("identity", session.identity().await, |name| {
            vec![format!("Name: {name}")]
        }));
        checks.push(required("interfaces", session.interfaces().await, |list| {
            let ether = list.iter().filter(|i| i.kind == "ether").count();
            let wlan = list.iter().filter(|i| i.kind == "wlan").count();
            let mut lines = vec![format!(
                "Total: {} (ethernet {ether}, wireless {wlan})",
                list.len()
            )];
            lines.extend(
                list.iter()
                    .take(3)
                    .map(|i| format!("{} ({})", i.name, i.kind)),
            );
            if list.len() > 3 {
                lines.push(format!("... and {} more", list.len() - 3));
            }
            lines
        }));
    }

    if mode == DiagnoseMode::Full {
        checks.push(optional("system health", session.health().await, |h| {
            vec![
                format!("Temperature: {}", h.temperature.as_deref().unwrap_or("N/A")),
                format!("Voltage: {}", h.voltage.as_deref().unwrap_or("N/A")),
            ]
        }));
        checks.push(optional("active users", session.active_users().await, |n| {
            vec![format!("Active sessions: {n}")]
        }));
        checks.push(optional("capsman", session.capsman_interfaces().await, |n| {
            vec![if n > 0 {
                format!("{n} managed interface(s)")
            } else {
                "Not configured".to_string()
            }]
        }));
    }

    session.close().await;
    Ok(DiagnosticReport {
        target,
        mode,
        checks,
    })
}

/// Follow-up steps for a failed session, by error class
pub fn troubleshooting_hints(err: &RouterError, router: &RouterConfig) -> Vec<String> {
    if err.is_auth() {
        vec![
            format!("Check the password and that user '{}' exists", router.username),
            "Check the user's group allows API access (read policy at minimum)".to_string(),
            "If the router runs RouterOS older than 6.43, set MIKROTIK_PLAINTEXT_LOGIN=false"
                .to_string(),
        ]
    } else if err.is_connectivity() {
        vec![
            "Make sure the router is powered on and reachable".to_string(),
            format!(
                "Make sure the API service is enabled: /ip service set api port={}",
                router.port
            ),
            format!("Check firewall rules allow TCP {} from this host", router.port),
            format!("Test manually: telnet {} {}", router.host, router.port),
        ]
    } else {
        vec![
            "The router answered but rejected a query; rerun with -vv for protocol details"
                .to_string(),
        ]
    }
}
