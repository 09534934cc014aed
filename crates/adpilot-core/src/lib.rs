// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Adpilot.
//!
//! Provides the shared domain types, the error taxonomy, pure KPI
//! derivation, and the adapter traits (`CampaignSource`, `Oracle`) that the
//! rest of the workspace implements.

pub mod error;
pub mod metrics;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AdpilotError;
pub use traits::{CampaignSource, FetchOutcome, Oracle};
pub use types::{
    Campaign, CampaignStatus, ChangeEvent, DataSource, DateRange, FetchPhase, KpiSet,
    RawMetricsRow,
};
