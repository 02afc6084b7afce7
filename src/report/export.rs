// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Writes the report to the primary, mirror and history locations

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::StatusReport;
use crate::config::OutputConfig;
use crate::error::{AppError, ExportFailure, Result};

/// Writes `report` to all three targets.
///
/// Every target is attempted even when an earlier one fails. The run
/// succeeds only if all three writes succeed; otherwise the error lists
/// each failed path. Returns the written paths in order: primary, mirror,
/// history copy.
pub async fn export_report(report: &StatusReport, output: &OutputConfig) -> Result<Vec<PathBuf>> {
    let body = report.to_json()?;
    let stamp = report.generated_at.format("%Y%m%d_%H%M%S").to_string();

    let mut written = Vec::with_capacity(3);
    let mut failures = Vec::new();

    for target in [&output.primary, &output.mirror] {
        match write_file(target, body.as_bytes()).await {
            Ok(()) => {
                tracing::debug!("Wrote {}", target.display());
                written.push(target.clone());
            }
            Err(source) => {
                tracing::error!("Failed to write {}: {}", target.display(), source);
                failures.push(ExportFailure {
                    path: target.clone(),
                    source,
                });
            }
        }
    }

    match write_unique(&output.history_dir, "status", &stamp, body.as_bytes()).await {
        Ok(path) => {
            tracing::debug!("Wrote history snapshot {}", path.display());
            written.push(path);
        }
        Err(source) => {
            tracing::error!(
                "Failed to write history snapshot in {}: {}",
                output.history_dir.display(),
                source
            );
            failures.push(ExportFailure {
                path: output.history_dir.clone(),
                source,
            });
        }
    }

    if failures.is_empty() {
        Ok(written)
    } else {
        Err(AppError::Export { failures })
    }
}

async fn write_file(path: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, body).await
}

/// Creates `dir/{prefix}_{stamp}.json` without overwriting anything.
///
/// When that name is taken, `_1`, `_2`, ... is appended to the stamp.
pub async fn write_unique(dir: &Path, prefix: &str, stamp: &str, body: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            format!("{prefix}_{stamp}.json")
        } else {
            format!("{prefix}_{stamp}_{attempt}.json")
        };
        let path = dir.join(name);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(body).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Summary, SystemInfo};
    use chrono::{Local, TimeZone};

    fn report() -> StatusReport {
        let at = Local.with_ymd_and_hms(2025, 2, 14, 7, 45, 30).unwrap();
        StatusReport {
            generated_at: at,
            customers: Vec::new(),
            summary: Summary {
                total: 0,
                online: 0,
                offline: 0,
                unknown: 0,
                availability_percent: 0.0,
            },
            system_info: SystemInfo {
                checked_at: "2025-02-14 07:45:30".to_string(),
                total_checked: 0,
            },
        }
    }

    fn output(root: &Path) -> OutputConfig {
        OutputConfig {
            primary: root.join("data/status.json"),
            mirror: root.join("docs/data/status.json"),
            history_dir: root.join("data/history"),
        }
    }

    #[tokio::test]
    async fn test_export_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = output(dir.path());

        let written = export_report(&report(), &out).await.unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(written[0], out.primary);
        assert_eq!(written[1], out.mirror);
        assert_eq!(
            written[2],
            out.history_dir.join("status_20250214_074530.json")
        );
        let primary = std::fs::read_to_string(&out.primary).unwrap();
        let mirror = std::fs::read_to_string(&out.mirror).unwrap();
        let history = std::fs::read_to_string(&written[2]).unwrap();
        assert_eq!(primary, mirror);
        assert_eq!(primary, history);
    }

    #[tokio::test]
    async fn test_history_names_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let out = output(dir.path());

        let first = export_report(&report(), &out).await.unwrap();
        let second = export_report(&report(), &out).await.unwrap();

        assert_ne!(first[2], second[2]);
        assert_eq!(
            second[2],
            out.history_dir.join("status_20250214_074530_1.json")
        );
    }

    #[tokio::test]
    async fn test_failed_target_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = output(dir.path());
        // A regular file where the mirror's parent directory should be
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "not a directory").unwrap();
        out.mirror = blocker.join("status.json");

        let err = export_report(&report(), &out).await.unwrap_err();

        match err {
            AppError::Export { failures } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].path, out.mirror);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(out.primary.exists());
        let history: Vec<_> = std::fs::read_dir(&out.history_dir).unwrap().collect();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_write_unique_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("metrics_20250101_000000.json");
        std::fs::write(&existing, "old").unwrap();

        let path = write_unique(dir.path(), "metrics", "20250101_000000", b"new")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("metrics_20250101_000000_1.json"));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "old");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
