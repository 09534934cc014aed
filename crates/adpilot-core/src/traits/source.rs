// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign data source trait consumed by the cache.

use async_trait::async_trait;

use crate::error::AdpilotError;
use crate::types::{Campaign, DateRange};

/// Result of a source fetch: derived campaigns plus whether period metrics
/// made it in. A listing-only fetch yields `metrics_available = false` with
/// all-zero current KPIs.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub campaigns: Vec<Campaign>,
    pub metrics_available: bool,
}

/// Produces derived campaign data for a date range.
///
/// Implementations own the whole acquisition path: listing retrieval,
/// report generation for the current and comparison periods, and KPI
/// derivation. The cache treats this as a black box and only sequences
/// calls to it.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    /// Fast path: listing only, no report wait. Current KPIs are all-zero.
    async fn fetch_listing(&self) -> Result<Vec<Campaign>, AdpilotError>;

    /// Full fetch: listing merged with current-period and best-effort
    /// previous-period metrics.
    async fn fetch_full(&self, range: &DateRange) -> Result<FetchOutcome, AdpilotError>;
}
