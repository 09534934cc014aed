// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed demo dataset.
//!
//! Served whenever live credentials are unconfigured or the upstream
//! fails, so the API surface stays explorable end to end. KPI values are
//! precomputed with the same formulas the live path uses.

use serde_json::json;

use adpilot_core::types::{
    BiddingStrategy, CampaignStatus, CampaignType, ChangeActor, ChangeEvent, ChangeType,
};
use adpilot_core::{Campaign, KpiSet};

/// Three campaigns covering the interesting shapes: a healthy performer,
/// one struggling after a bid cut, and a young campaign with no
/// previous-period data.
pub fn demo_campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: "demo-1".into(),
            name: "Demo - Wireless Earbuds Auto".into(),
            campaign_type: CampaignType::SpAuto,
            status: CampaignStatus::Enabled,
            daily_budget: 40.0,
            bidding_strategy: BiddingStrategy::DynamicDownOnly,
            start_date: "2025-09-12".into(),
            current: KpiSet {
                impressions: 15420,
                clicks: 486,
                orders: 52,
                units: 58,
                sales: 2340.0,
                spend: 612.36,
                cpc: 1.26,
                ctr: 3.15,
                acos: 26.17,
                roas: 3.82,
                conversion_rate: 10.70,
            },
            previous: Some(KpiSet {
                impressions: 14100,
                clicks: 440,
                orders: 47,
                units: 50,
                sales: 2100.0,
                spend: 550.0,
                cpc: 1.25,
                ctr: 3.12,
                acos: 26.19,
                roas: 3.82,
                conversion_rate: 10.68,
            }),
        },
        Campaign {
            id: "demo-2".into(),
            name: "Demo - Yoga Mats Exact".into(),
            campaign_type: CampaignType::SpManual,
            status: CampaignStatus::Enabled,
            daily_budget: 15.0,
            bidding_strategy: BiddingStrategy::FixedBid,
            start_date: "2025-06-03".into(),
            current: KpiSet {
                impressions: 8200,
                clicks: 164,
                orders: 9,
                units: 9,
                sales: 405.0,
                spend: 311.60,
                cpc: 1.90,
                ctr: 2.00,
                acos: 76.94,
                roas: 1.30,
                conversion_rate: 5.49,
            },
            previous: Some(KpiSet {
                impressions: 9800,
                clicks: 196,
                orders: 13,
                units: 13,
                sales: 585.0,
                spend: 333.20,
                cpc: 1.70,
                ctr: 2.00,
                acos: 56.96,
                roas: 1.76,
                conversion_rate: 6.63,
            }),
        },
        Campaign {
            id: "demo-3".into(),
            name: "Demo - Desk Lamps Broad".into(),
            campaign_type: CampaignType::SpManual,
            status: CampaignStatus::Enabled,
            daily_budget: 10.0,
            bidding_strategy: BiddingStrategy::FixedBid,
            start_date: "2026-02-14".into(),
            current: KpiSet {
                impressions: 3100,
                clicks: 62,
                orders: 6,
                units: 7,
                sales: 270.0,
                spend: 74.40,
                cpc: 1.20,
                ctr: 2.00,
                acos: 27.56,
                roas: 3.63,
                conversion_rate: 9.68,
            },
            previous: None,
        },
    ]
}

/// Change history matching the demo campaigns: the Yoga Mats bid raise
/// that explains its ACOS jump, and a budget raise on the winner.
pub fn demo_change_events() -> Vec<ChangeEvent> {
    vec![
        ChangeEvent {
            id: "demo-ch-1".into(),
            campaign_id: "demo-2".into(),
            campaign_name: "Demo - Yoga Mats Exact".into(),
            change_type: ChangeType::Bid,
            field: "defaultBid".into(),
            old_value: json!(1.70),
            new_value: json!(1.90),
            changed_at: "2026-02-09T16:42:00Z".into(),
            changed_by: ChangeActor::User,
        },
        ChangeEvent {
            id: "demo-ch-2".into(),
            campaign_id: "demo-1".into(),
            campaign_name: "Demo - Wireless Earbuds Auto".into(),
            change_type: ChangeType::Budget,
            field: "dailyBudget".into(),
            old_value: json!(30.0),
            new_value: json!(40.0),
            changed_at: "2026-02-12T09:15:00Z".into(),
            changed_by: ChangeActor::User,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpilot_core::metrics;

    #[test]
    fn demo_kpis_match_the_derivation_formulas() {
        for campaign in demo_campaigns() {
            let k = &campaign.current;
            if k.clicks > 0 {
                assert_eq!(k.cpc, metrics::round2(k.spend / k.clicks as f64), "{}", campaign.name);
                assert_eq!(
                    k.conversion_rate,
                    metrics::round2(k.orders as f64 / k.clicks as f64 * 100.0),
                    "{}",
                    campaign.name
                );
            }
            if k.sales > 0.0 {
                assert_eq!(k.acos, metrics::round2(k.spend / k.sales * 100.0), "{}", campaign.name);
            }
        }
    }

    #[test]
    fn change_events_reference_demo_campaigns() {
        let ids: Vec<String> = demo_campaigns().into_iter().map(|c| c.id).collect();
        for event in demo_change_events() {
            assert!(ids.contains(&event.campaign_id));
        }
    }
}
