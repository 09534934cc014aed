// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Amazon Ads API (LwA token, SP v3 listing, v3 reporting).

use serde::{Deserialize, Serialize};

/// LwA token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Seconds until expiry; the upstream occasionally omits it.
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// One campaign as returned by `/sp/campaigns/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedCampaign {
    pub campaign_id: u64,
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub budget: Option<CampaignBudget>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub dynamic_bidding: Option<DynamicBidding>,
    #[serde(default)]
    pub targeting_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBudget {
    pub budget: f64,
    #[serde(default)]
    pub budget_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicBidding {
    #[serde(default)]
    pub strategy: Option<String>,
}

/// One page of the paginated campaign listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListPage {
    #[serde(default)]
    pub campaigns: Vec<ListedCampaign>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// One advertised product as returned by `/sp/productAds/list`. Served
/// back out verbatim on the gateway's product route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAd {
    pub ad_id: u64,
    pub campaign_id: u64,
    pub asin: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

/// One page of the paginated product-ad listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAdListPage {
    #[serde(default)]
    pub product_ads: Vec<ProductAd>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// An advertising profile from `/v2/profiles`. Served back out verbatim
/// on the gateway's profile route for credential verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsProfile {
    pub profile_id: u64,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_info: Option<AccountInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace_string_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Report creation response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreated {
    pub report_id: String,
}

/// Report status as returned by `GET /reporting/reports/{id}`.
///
/// `status` is `COMPLETED` or `FAILURE` when terminal; everything else
/// (PENDING, PROCESSING, ...) means keep polling.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatus {
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

/// Report definition submitted to `POST /reporting/reports`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub configuration: ReportConfiguration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    pub ad_product: &'static str,
    pub group_by: Vec<&'static str>,
    pub columns: Vec<&'static str>,
    pub report_type_id: &'static str,
    pub time_unit: &'static str,
    pub format: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_page_parses_with_missing_optionals() {
        let page: CampaignListPage = serde_json::from_str(
            r#"{
                "campaigns": [
                    {"campaignId": 111, "name": "Widgets Exact", "state": "ENABLED",
                     "budget": {"budget": 25.0, "budgetType": "DAILY"},
                     "startDate": "2026-01-15",
                     "dynamicBidding": {"strategy": "LEGACY_FOR_SALES"},
                     "targetingType": "MANUAL"},
                    {"campaignId": 222, "name": "Auto Discovery", "state": "PAUSED"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(page.campaigns.len(), 2);
        assert!(page.next_token.is_none());
        assert_eq!(page.campaigns[0].budget.as_ref().unwrap().budget, 25.0);
        assert!(page.campaigns[1].budget.is_none());
    }

    #[test]
    fn report_status_parses_terminal_and_pending() {
        let done: ReportStatus = serde_json::from_str(
            r#"{"status": "COMPLETED", "url": "https://example.com/r.gz"}"#,
        )
        .unwrap();
        assert_eq!(done.status, "COMPLETED");
        assert!(done.url.is_some());

        let pending: ReportStatus = serde_json::from_str(r#"{"status": "PROCESSING"}"#).unwrap();
        assert_eq!(pending.status, "PROCESSING");
        assert!(pending.url.is_none());

        let failed: ReportStatus = serde_json::from_str(
            r#"{"status": "FAILURE", "failureReason": "invalid column"}"#,
        )
        .unwrap();
        assert_eq!(failed.failure_reason.as_deref(), Some("invalid column"));
    }
}
