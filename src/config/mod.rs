// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the status monitor
//!
//! Router credentials and output locations come from environment variables
//! (optionally seeded from a `.env` file). The customer roster is a JSON file.

mod roster;


use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub use roster::{Customer, load_roster};

/// Default configuration values
pub mod defaults {
    pub const ROUTEROS_PORT: u16 = 8728;
    pub const TIMEOUT_SECS: u64 = 10;
    pub const PLAINTEXT_LOGIN: bool = true;
    pub const CUSTOMERS_FILE: &str = "config/customers.json";
    pub const STATUS_FILE: &str = "data/status.json";
    pub const STATUS_MIRROR_FILE: &str = "docs/data/status.json";
    pub const HISTORY_DIR: &str = "data/history";
    pub const METRICS_DIR: &str = "data";
    pub const SERVER_ADDR: &str = "127.0.0.1:8080";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const HOST: &str = "MIKROTIK_HOST";
    pub const USER: &str = "MIKROTIK_USER";
    pub const PASS: &str = "MIKROTIK_PASS";
    pub const PORT: &str = "MIKROTIK_PORT";
    pub const PLAINTEXT_LOGIN: &str = "MIKROTIK_PLAINTEXT_LOGIN";
    pub const TIMEOUT_SECS: &str = "MIKROTIK_TIMEOUT_SECS";
    pub const CUSTOMERS_FILE: &str = "CUSTOMERS_FILE";
    pub const STATUS_FILE: &str = "STATUS_FILE";
    pub const STATUS_MIRROR_FILE: &str = "STATUS_MIRROR_FILE";
    pub const HISTORY_DIR: &str = "HISTORY_DIR";
    pub const METRICS_DIR: &str = "METRICS_DIR";
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
}

/// Connection parameters for the monitored router
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// `false` selects the pre-6.43 MD5 challenge login
    pub plaintext_login: bool,
    /// Bounds the TCP connect and every command reply
    pub timeout: Duration,
}

impl RouterConfig {
    /// Loads the router section from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the router section through an arbitrary variable lookup.
    ///
    /// Host, user and password must be present and non-blank; port, login
    /// mode and timeout fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} is not set")))
        };

        let host = required(env_vars::HOST)?;
        let username = required(env_vars::USER)?;
        let password = SecretString::from(required(env_vars::PASS)?);

        let port = match lookup(env_vars::PORT) {
            Some(v) => v.trim().parse::<u16>().map_err(|_| {
                AppError::Config(format!("{} must be a port number, got '{v}'", env_vars::PORT))
            })?,
            None => defaults::ROUTEROS_PORT,
        };

        let plaintext_login = match lookup(env_vars::PLAINTEXT_LOGIN) {
            Some(v) => parse_flag(&v).ok_or_else(|| {
                AppError::Config(format!(
                    "{} must be true or false, got '{v}'",
                    env_vars::PLAINTEXT_LOGIN
                ))
            })?,
            None => defaults::PLAINTEXT_LOGIN,
        };

        let timeout_secs = match lookup(env_vars::TIMEOUT_SECS) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "{} must be a positive number of seconds, got '{v}'",
                        env_vars::TIMEOUT_SECS
                    ))
                })?,
            None => defaults::TIMEOUT_SECS,
        };

        Ok(Self {
            host: host.trim().to_string(),
            port,
            username,
            password,
            plaintext_login,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `host:port`, with IPv6 literals bracketed
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Where the status report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub primary: PathBuf,
    /// Copy published with the static dashboard
    pub mirror: PathBuf,
    pub history_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(defaults::STATUS_FILE),
            mirror: PathBuf::from(defaults::STATUS_MIRROR_FILE),
            history_dir: PathBuf::from(defaults::HISTORY_DIR),
        }
    }
}

/// File locations and server settings; everything here has a default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub customers_file: PathBuf,
    pub output: OutputConfig,
    pub metrics_dir: PathBuf,
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            customers_file: PathBuf::from(defaults::CUSTOMERS_FILE),
            output: OutputConfig::default(),
            metrics_dir: PathBuf::from(defaults::METRICS_DIR),
            server_addr: defaults::SERVER_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str, default: &str| {
            PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()))
        };

        Config {
            customers_file: path(env_vars::CUSTOMERS_FILE, defaults::CUSTOMERS_FILE),
            output: OutputConfig {
                primary: path(env_vars::STATUS_FILE, defaults::STATUS_FILE),
                mirror: path(env_vars::STATUS_MIRROR_FILE, defaults::STATUS_MIRROR_FILE),
                history_dir: path(env_vars::HISTORY_DIR, defaults::HISTORY_DIR),
            },
            metrics_dir: path(env_vars::METRICS_DIR, defaults::METRICS_DIR),
            server_addr: lookup(env_vars::SERVER_ADDR)
                .unwrap_or_else(|| defaults::SERVER_ADDR.to_string()),
        }
    }
}
