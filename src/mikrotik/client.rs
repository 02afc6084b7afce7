// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! High-level MikroTik client

use crate::config::RouterConfig;
use secrecy::ExposeSecret;

use super::connection::{
    RouterOsConnection, parse_dhcp_leases, parse_health, parse_identity, parse_interfaces,
    parse_netwatch, parse_system, summarize_connections,
};
use super::error::RouterError;
use super::types::{
    ConnectionSummary, DhcpSummary, InterfaceStats, NetwatchMap, SystemHealth, SystemResource,
};

/// An authenticated `RouterOS` API session
///
/// One session serves one run: open it, issue the read-only queries the
/// run needs, then [`close`](Self::close) it.
pub struct RouterSession {
    conn: RouterOsConnection,
    address: String,
}

impl RouterSession {
    /// Connects and logs in
    pub async fn open(config: &RouterConfig) -> Result<Self, RouterError> {
        let address = config.address();
        tracing::debug!("Opening RouterOS session to {}", address);
        let mut conn = RouterOsConnection::connect(&address, config.timeout).await?;
        if let Err(e) = conn
            .login(
                &config.username,
                config.password.expose_secret(),
                config.plaintext_login,
            )
            .await
        {
            conn.close().await;
            return Err(e);
        }
        Ok(Self { conn, address })
    }

    pub async fn netwatch(&mut self) -> Result<NetwatchMap, RouterError> {
        let sentences = self.conn.command("/tool/netwatch/print", &[]).await?;
        Ok(parse_netwatch(&sentences))
    }

    pub async fn system_resource(&mut self) -> Result<SystemResource, RouterError> {
        let sentences = self.conn.command("/system/resource/print", &[]).await?;
        Ok(parse_system(&sentences))
    }

    pub async fn identity(&mut self) -> Result<String, RouterError> {
        let sentences = self.conn.command("/system/identity/print", &[]).await?;
        Ok(parse_identity(&sentences).unwrap_or_else(|| "unknown".to_string()))
    }

    pub async fn interfaces(&mut self) -> Result<Vec<InterfaceStats>, RouterError> {
        let sentences = self.conn.command("/interface/print", &[]).await?;
        Ok(parse_interfaces(&sentences))
    }

    pub async fn connections(&mut self) -> Result<ConnectionSummary, RouterError> {
        let sentences = self
            .conn
            .command("/ip/firewall/connection/print", &["=.proplist=protocol"])
            .await?;
        Ok(summarize_connections(&sentences))
    }

    pub async fn dhcp_leases(&mut self) -> Result<DhcpSummary, RouterError> {
        let sentences = self
            .conn
            .command("/ip/dhcp-server/lease/print", &["=.proplist=status"])
            .await?;
        Ok(parse_dhcp_leases(&sentences))
    }

    pub async fn health(&mut self) -> Result<SystemHealth, RouterError> {
        let sentences = self.conn.command("/system/health/print", &[]).await?;
        Ok(parse_health(&sentences))
    }

    pub async fn active_users(&mut self) -> Result<usize, RouterError> {
        Ok(self.conn.command("/user/active/print", &[]).await?.len())
    }

    /// Number of CAPsMAN-managed interfaces
    pub async fn capsman_interfaces(&mut self) -> Result<usize, RouterError> {
        Ok(self.conn.command("/caps-man/interface/print", &[]).await?.len())
    }

    pub async fn close(self) {
        tracing::debug!("Closing RouterOS session to {}", self.address);
        self.conn.close().await;
    }
}

/// Reads the router's netwatch table in a single session.
///
/// An empty table is a successful, empty result. Every failure to reach
/// or query the router is returned as an error.
pub async fn fetch_netwatch_status(config: &RouterConfig) -> Result<NetwatchMap, RouterError> {
    let mut session = RouterSession::open(config).await.inspect_err(|e| {
        tracing::error!("Router {} unavailable: {}", config.address(), e);
    })?;
    let result = session.netwatch().await;
    session.close().await;
    result.inspect_err(|e| tracing::error!("Netwatch query failed: {}", e))
}
