// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prometheus rendering of the latest status report

mod labels;
mod registry;

/// Labels for customer and state series
pub use labels::{CustomerLabels, StateLabels};

/// Prometheus registry built from a report
pub use registry::StatusMetrics;
