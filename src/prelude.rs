// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use mikrotik_status::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, Customer, OutputConfig, RouterConfig};
pub use crate::error::{AppError, Result};

// Report types
pub use crate::report::{CustomerStatus, HostStatus, StatusReport, Summary};

// MikroTik client
pub use crate::mikrotik::{NetwatchEntry, NetwatchMap, NetwatchState, RouterError, RouterSession};
