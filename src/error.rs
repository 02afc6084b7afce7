//! Error types for the MikroTik status monitor

use std::path::PathBuf;
use thiserror::Error;

use crate::mikrotik::RouterError;

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const ROUTER: i32 = 3;
    pub const EMPTY_NETWATCH: i32 = 4;
    pub const EXPORT: i32 = 5;
}

/// One output file that could not be written
#[derive(Debug, Error)]
#[error("{} ({source})", .path.display())]
pub struct ExportFailure {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Router could not be reached, refused the login or failed a query
    #[error("RouterOS error: {0}")]
    RouterOs(#[from] RouterError),

    /// Router answered but its netwatch table is empty
    #[error("No netwatch entries configured on router {router}")]
    EmptyNetwatch { router: String },

    /// At least one output file could not be written
    #[error("Export failed: {}", join_failures(.failures))]
    Export { failures: Vec<ExportFailure> },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

fn join_failures(failures: &[ExportFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::AddrParse(_) => exit_code::CONFIG,
            Self::RouterOs(_) => exit_code::ROUTER,
            Self::EmptyNetwatch { .. } => exit_code::EMPTY_NETWATCH,
            Self::Export { .. } => exit_code::EXPORT,
            Self::Io(_) | Self::Json(_) | Self::Metrics(_) => exit_code::GENERAL,
        }
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
