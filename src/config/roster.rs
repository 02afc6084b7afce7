// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Customer roster loading

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, Result};

/// A monitored customer as listed in the roster file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "no")]
    pub sequence_number: u32,
    pub name: String,
    #[serde(rename = "ip")]
    pub ip_address: String,
}

/// Reads the roster: a JSON array of `{"no", "name", "ip"}` objects
pub async fn load_roster(path: &Path) -> Result<Vec<Customer>> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Config(format!("Cannot read roster {}: {e}", path.display()))
    })?;
    let customers: Vec<Customer> = serde_json::from_str(&text).map_err(|e| {
        AppError::Config(format!("Invalid roster {}: {e}", path.display()))
    })?;

    let mut seen = HashSet::new();
    for c in &customers {
        if !seen.insert(c.sequence_number) {
            tracing::warn!(
                "Roster number {} is used more than once (latest: {})",
                c.sequence_number,
                c.name
            );
        }
    }

    tracing::debug!("Loaded {} customers from {}", customers.len(), path.display());
    Ok(customers)
}
