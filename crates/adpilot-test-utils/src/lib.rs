// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic test doubles for the Adpilot pipeline seams.
//!
//! `MockOracle` scripts oracle outcomes; `StubCampaignSource` serves fixed
//! campaign data while counting fetches. Both enable fast, CI-runnable
//! tests without external API calls.

pub mod mock_oracle;
pub mod stub_source;

pub use mock_oracle::{MockOracle, MockReply};
pub use stub_source::StubCampaignSource;

use adpilot_core::types::{BiddingStrategy, CampaignStatus, CampaignType};
use adpilot_core::{Campaign, KpiSet};

/// A derived campaign with plausible KPI values for tests.
pub fn sample_campaign(id: &str, name: &str) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        campaign_type: CampaignType::SpManual,
        status: CampaignStatus::Enabled,
        daily_budget: 25.0,
        bidding_strategy: BiddingStrategy::FixedBid,
        start_date: "2026-01-15".to_string(),
        current: KpiSet {
            impressions: 1000,
            clicks: 50,
            orders: 5,
            units: 6,
            sales: 250.0,
            spend: 125.0,
            cpc: 2.50,
            ctr: 5.00,
            acos: 50.00,
            roas: 2.00,
            conversion_rate: 10.00,
        },
        previous: Some(KpiSet {
            impressions: 900,
            clicks: 40,
            orders: 4,
            units: 4,
            sales: 200.0,
            spend: 80.0,
            cpc: 2.00,
            ctr: 4.44,
            acos: 40.00,
            roas: 2.50,
            conversion_rate: 10.00,
        }),
    }
}
