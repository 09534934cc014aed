// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the Adpilot workspace.
//!
//! Wire shapes use camelCase field names so they serialize exactly as the
//! upstream report rows and the gateway's JSON responses expect.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::error::AdpilotError;

/// Campaign lifecycle state as shown to the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum CampaignStatus {
    Enabled,
    Paused,
    Archived,
}

impl CampaignStatus {
    /// Maps the upstream state string (`ENABLED`, `PAUSED`, anything else)
    /// to the seller-facing status.
    pub fn from_upstream(state: &str) -> Self {
        match state {
            "ENABLED" => CampaignStatus::Enabled,
            "PAUSED" => CampaignStatus::Paused,
            _ => CampaignStatus::Archived,
        }
    }
}

/// Campaign ad-product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignType {
    #[serde(rename = "SP Manual")]
    SpManual,
    #[serde(rename = "SP Auto")]
    SpAuto,
    #[serde(rename = "SB")]
    SponsoredBrands,
    #[serde(rename = "SD")]
    SponsoredDisplay,
}

/// Seller-facing bidding strategy label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiddingStrategy {
    #[serde(rename = "Fixed Bid")]
    FixedBid,
    #[serde(rename = "Dynamic Bids - Down Only")]
    DynamicDownOnly,
    #[serde(rename = "Dynamic Bids - Up and Down")]
    DynamicUpAndDown,
}

impl BiddingStrategy {
    /// Maps the upstream `dynamicBidding.strategy` identifier.
    pub fn from_upstream(strategy: Option<&str>) -> Self {
        match strategy {
            Some("AUTO_FOR_SALES") => BiddingStrategy::DynamicDownOnly,
            // LEGACY_FOR_SALES, MANUAL, and unknown strategies all render
            // as a fixed bid.
            _ => BiddingStrategy::FixedBid,
        }
    }
}

/// One raw, period-scoped row of campaign counters from the reporting
/// endpoint. Absence of a row for a campaign means zero activity in that
/// period, not missing data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetricsRow {
    /// Upstream sends this as a string in report rows but as a number in
    /// listings; accept both.
    #[serde(deserialize_with = "string_or_number")]
    pub campaign_id: String,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub cost: f64,
    /// 7-day attributed purchases.
    #[serde(default, rename = "purchases7d")]
    pub purchases_7d: u64,
    /// 7-day attributed units sold from clicks.
    #[serde(default, rename = "unitsSoldClicks7d")]
    pub units_sold_clicks_7d: u64,
    /// 7-day attributed sales revenue.
    #[serde(default, rename = "sales7d")]
    pub sales_7d: f64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number campaign id, got {other}"
        ))),
    }
}

/// Derived KPI set for one period, rounded at derivation time so cached and
/// transmitted values are stable across repeated reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub impressions: u64,
    pub clicks: u64,
    pub orders: u64,
    pub units: u64,
    pub sales: f64,
    pub spend: f64,
    pub cpc: f64,
    pub ctr: f64,
    pub acos: f64,
    pub roas: f64,
    pub conversion_rate: f64,
}

/// A campaign with identity/config fields plus derived KPI sets for the
/// current and (optionally) previous period.
///
/// `previous` is `None` when no previous-period row exists. That is a real
/// tri-state: "no prior data" must not collapse into "0% change", so
/// consumers suppress delta output instead of dividing by an absent value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub status: CampaignStatus,
    pub daily_budget: f64,
    pub bidding_strategy: BiddingStrategy,
    #[serde(default)]
    pub start_date: String,
    pub current: KpiSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<KpiSet>,
}

/// Which actor applied a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeActor {
    User,
    Automation,
}

/// Category of a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Bid,
    Budget,
    Status,
    Keyword,
    Placement,
}

/// Immutable record of a single seller- or automation-initiated
/// configuration change. Read-only correlation input for the oracle; never
/// mutated by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub id: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub change_type: ChangeType,
    pub field: String,
    pub old_value: serde_json::Value,
    pub new_value: serde_json::Value,
    /// ISO 8601 timestamp.
    pub changed_at: String,
    pub changed_by: ChangeActor,
}

/// An inclusive date range (`YYYY-MM-DD` bounds) selecting the current
/// analysis period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Cache key for this range. A differing key invalidates the cached
    /// entry outright.
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.from, self.to)
    }

    /// Whether both endpoints are present. An unbounded range cannot
    /// parameterize a metrics report.
    pub fn is_bounded(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }

    /// The comparison window: same length as this range, ending the day
    /// before it starts.
    pub fn previous_period(&self) -> Result<DateRange, AdpilotError> {
        let from = parse_date(&self.from)?;
        let to = parse_date(&self.to)?;
        let duration = to.signed_duration_since(from);
        let prev_to = from - chrono::Duration::days(1);
        let prev_from = prev_to - duration;
        Ok(DateRange {
            from: prev_from.format("%Y-%m-%d").to_string(),
            to: prev_to.format("%Y-%m-%d").to_string(),
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, AdpilotError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| AdpilotError::Config(format!("invalid date {s:?}: {e}")))
}

/// Whether campaign data came from the live upstream or the demo fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Mock,
}

/// Which acquisition phase a campaigns read requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPhase {
    /// Fast path: listing only, no report wait.
    Listing,
    /// Metrics-bearing fetch only.
    Metrics,
    /// Listing merged with current and previous period metrics.
    #[default]
    All,
}
