// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS client error type

use std::time::Duration;
use thiserror::Error;

/// Failure talking to a RouterOS device.
///
/// Every variant means the router could not be queried. A query that
/// succeeds with zero rows is not an error at this level.
#[derive(Debug, Error)]
pub enum RouterError {
    /// TCP connect refused, unreachable host, DNS failure...
    #[error("Cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection to {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },

    /// Login rejected by the router
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// `!trap` reply to a command
    #[error("RouterOS trap: {0}")]
    Trap(String),

    #[error("Read timeout: RouterOS did not respond within {0:?}")]
    ReadTimeout(Duration),

    /// Socket error after the session was established
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unexpected reply
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl RouterError {
    /// True when the router could not be reached at all
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. } | Self::ConnectTimeout { .. } | Self::ReadTimeout(_) | Self::Io(_)
        )
    }

    /// True when the router answered but refused the credentials
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}
