// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`CampaignSource`] implementation backed by the Ads API.
//!
//! Merges the campaign listing with the current-period report and a
//! best-effort previous-period report, deriving KPI sets as it goes.
//! Listing failure is a hard error; report failures degrade to
//! `metrics_available = false` rather than failing the whole fetch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use adpilot_core::types::{BiddingStrategy, CampaignStatus, CampaignType};
use adpilot_core::{
    AdpilotError, Campaign, CampaignSource, DateRange, FetchOutcome, RawMetricsRow, metrics,
};

use crate::client::AdsClient;
use crate::types::ListedCampaign;

/// Live campaign source backed by [`AdsClient`]. The client is shared with
/// the gateway's profile and product-ad routes.
pub struct AmazonCampaignSource {
    client: Arc<AdsClient>,
}

impl AmazonCampaignSource {
    pub fn new(client: Arc<AdsClient>) -> Self {
        Self { client }
    }

    fn map_campaign(
        listed: &ListedCampaign,
        current: Option<&RawMetricsRow>,
        previous: Option<&RawMetricsRow>,
    ) -> Campaign {
        Campaign {
            id: listed.campaign_id.to_string(),
            name: listed.name.clone(),
            campaign_type: match listed.targeting_type.as_deref() {
                Some("AUTO") => CampaignType::SpAuto,
                _ => CampaignType::SpManual,
            },
            status: CampaignStatus::from_upstream(&listed.state),
            daily_budget: listed.budget.as_ref().map(|b| b.budget).unwrap_or(0.0),
            bidding_strategy: BiddingStrategy::from_upstream(
                listed
                    .dynamic_bidding
                    .as_ref()
                    .and_then(|d| d.strategy.as_deref()),
            ),
            start_date: listed.start_date.clone().unwrap_or_default(),
            current: metrics::derive_or_zero(current),
            previous: metrics::derive_previous(previous),
        }
    }
}

#[async_trait]
impl CampaignSource for AmazonCampaignSource {
    async fn fetch_listing(&self) -> Result<Vec<Campaign>, AdpilotError> {
        let listed = self.client.list_campaigns().await?;
        Ok(listed
            .iter()
            .map(|c| Self::map_campaign(c, None, None))
            .collect())
    }

    async fn fetch_full(&self, range: &DateRange) -> Result<FetchOutcome, AdpilotError> {
        let listed = self.client.list_campaigns().await?;

        let mut metrics_available = false;
        let mut current_rows: Vec<RawMetricsRow> = Vec::new();
        let mut previous_rows: Vec<RawMetricsRow> = Vec::new();

        // A date-less request gets the listing only; submitting a report
        // with empty dates would just bounce off the upstream.
        if !range.is_bounded() {
            warn!("no report period given, serving listing without metrics");
            let campaigns = listed
                .iter()
                .map(|c| Self::map_campaign(c, None, None))
                .collect();
            return Ok(FetchOutcome {
                campaigns,
                metrics_available,
            });
        }

        match self.client.campaign_report(range).await {
            Ok(rows) => {
                metrics_available = true;
                current_rows = rows;

                // Comparison period is best-effort: campaigns simply keep
                // `previous: None` when it cannot be fetched.
                match range.previous_period() {
                    Ok(previous_range) => {
                        match self.client.campaign_report(&previous_range).await {
                            Ok(rows) => previous_rows = rows,
                            Err(err) => {
                                warn!(error = %err, "previous-period report unavailable");
                            }
                        }
                    }
                    Err(err) => warn!(error = %err, "cannot derive comparison period"),
                }
            }
            Err(err) => {
                warn!(error = %err, "current-period report unavailable, serving listing without metrics");
            }
        }

        let current_by_id: HashMap<&str, &RawMetricsRow> = current_rows
            .iter()
            .map(|r| (r.campaign_id.as_str(), r))
            .collect();
        let previous_by_id: HashMap<&str, &RawMetricsRow> = previous_rows
            .iter()
            .map(|r| (r.campaign_id.as_str(), r))
            .collect();

        let campaigns = listed
            .iter()
            .map(|c| {
                let id = c.campaign_id.to_string();
                Self::map_campaign(
                    c,
                    current_by_id.get(id.as_str()).copied(),
                    previous_by_id.get(id.as_str()).copied(),
                )
            })
            .collect();

        Ok(FetchOutcome {
            campaigns,
            metrics_available,
        })
    }
}
