// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Campaign reads degrade to the demo dataset instead of erroring:
//! unconfigured credentials skip the live path before any network call,
//! and an upstream failure substitutes demo data after the fact with the
//! error attached. Oracle-side failures do surface, with the rate-limit
//! condition mapped to 429 and a machine-readable code.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use adpilot_advisor::{InsightsResponse, PromptInputs, SuggestionsResponse};
use adpilot_amazon::{AdsProfile, ProductAd};
use adpilot_cache::CacheReadout;
use adpilot_core::types::{DataSource, FetchPhase};
use adpilot_core::{AdpilotError, Campaign, ChangeEvent, DateRange};
use adpilot_feedback::FeedbackEntry;

use crate::demo;
use crate::server::AppState;

/// Query parameters for GET /v1/campaigns.
#[derive(Debug, Deserialize)]
pub struct CampaignsQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub phase: FetchPhase,
}

/// Response body for GET /v1/campaigns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignsResponse {
    pub success: bool,
    pub source: DataSource,
    pub phase: &'static str,
    pub metrics_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: Vec<Campaign>,
}

impl CampaignsResponse {
    fn from_readout(phase: FetchPhase, readout: CacheReadout) -> Self {
        Self {
            success: true,
            source: readout.source,
            phase: if readout.cached {
                "cached"
            } else {
                phase_str(phase)
            },
            metrics_available: readout.metrics_available,
            cached: readout.cached.then_some(true),
            cache_age: readout.cache_age,
            refreshing: readout.refreshing.then_some(true),
            error: None,
            data: readout.data,
        }
    }

    fn demo(phase: FetchPhase, error: Option<String>) -> Self {
        Self {
            success: true,
            source: DataSource::Mock,
            phase: phase_str(phase),
            metrics_available: true,
            cached: None,
            cache_age: None,
            refreshing: None,
            error,
            data: demo::demo_campaigns(),
        }
    }
}

fn phase_str(phase: FetchPhase) -> &'static str {
    match phase {
        FetchPhase::Listing => "listing",
        FetchPhase::Metrics => "metrics",
        FetchPhase::All => "all",
    }
}

/// Request body shared by POST /v1/suggestions and POST /v1/insights.
/// Campaigns are sourced from the cache, not the request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    #[serde(default)]
    pub change_events: Vec<ChangeEvent>,
    pub date_range: DateRange,
}

/// Generic success envelope.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

/// Response body for GET /v1/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /v1/health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /v1/campaigns?from&to&phase
pub async fn get_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignsQuery>,
) -> Response {
    let phase = query.phase;
    let range = DateRange::new(
        query.from.unwrap_or_default(),
        query.to.unwrap_or_default(),
    );

    if !state.amazon_configured {
        return Json(CampaignsResponse::demo(phase, None)).into_response();
    }

    match state.cache.read(&range, phase).await {
        Ok(readout) => Json(CampaignsResponse::from_readout(phase, readout)).into_response(),
        Err(err) => {
            warn!(error = %err, "live campaign fetch failed, serving demo data");
            Json(CampaignsResponse::demo(phase, Some(err.to_string()))).into_response()
        }
    }
}

/// GET /v1/products
///
/// Advertised products straight from the Ads API. No demo fallback: the
/// catalog is enrichment, and an empty or failed read should look like one.
pub async fn get_products(State(state): State<AppState>) -> Response {
    match state.ads.list_product_ads().await {
        Ok(data) => Json(DataEnvelope::<Vec<ProductAd>> {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /v1/profiles
///
/// The advertising profiles visible to the configured credentials, for
/// verifying a credential set maps to the expected account.
pub async fn get_profiles(State(state): State<AppState>) -> Response {
    match state.ads.list_profiles().await {
        Ok(data) => Json(DataEnvelope::<Vec<AdsProfile>> {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /v1/changes
///
/// No live change-history upstream is wired; this serves the recorded demo
/// set. Live flows submit their change events in the advice request body.
pub async fn get_changes() -> Json<DataEnvelope<Vec<ChangeEvent>>> {
    Json(DataEnvelope {
        success: true,
        data: demo::demo_change_events(),
    })
}

/// GET /v1/feedback
pub async fn get_feedback(State(state): State<AppState>) -> Response {
    match state.feedback.read_all().await {
        Ok(data) => Json(DataEnvelope {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// Response body for POST /v1/feedback.
#[derive(Debug, Serialize)]
pub struct FeedbackSavedResponse {
    pub success: bool,
    pub saved: FeedbackEntry,
}

/// POST /v1/feedback
pub async fn post_feedback(
    State(state): State<AppState>,
    Json(entry): Json<FeedbackEntry>,
) -> Response {
    match state.feedback.append(entry).await {
        Ok(saved) => Json(FeedbackSavedResponse {
            success: true,
            saved,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /v1/suggestions
pub async fn post_suggestions(
    State(state): State<AppState>,
    Json(body): Json<AdviceRequest>,
) -> Response {
    let campaigns = campaigns_for(&state, &body.date_range).await;
    let digest = feedback_digest(&state).await;
    let inputs = PromptInputs {
        campaigns: &campaigns,
        change_events: &body.change_events,
        range: &body.date_range,
        feedback_digest: &digest,
    };

    match state.advisor.campaign_suggestions(&inputs).await {
        Ok(data) => Json(DataEnvelope::<SuggestionsResponse> {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /v1/insights
pub async fn post_insights(
    State(state): State<AppState>,
    Json(body): Json<AdviceRequest>,
) -> Response {
    let campaigns = campaigns_for(&state, &body.date_range).await;
    let digest = feedback_digest(&state).await;
    let inputs = PromptInputs {
        campaigns: &campaigns,
        change_events: &body.change_events,
        range: &body.date_range,
        feedback_digest: &digest,
    };

    match state.advisor.insights(&inputs).await {
        Ok(data) => Json(DataEnvelope::<InsightsResponse> {
            success: true,
            data,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// Campaigns for an advice request: the cache when live data is possible,
/// the demo set otherwise.
async fn campaigns_for(state: &AppState, range: &DateRange) -> Vec<Campaign> {
    if !state.amazon_configured {
        return demo::demo_campaigns();
    }
    match state.cache.read(range, FetchPhase::All).await {
        Ok(readout) => readout.data,
        Err(err) => {
            warn!(error = %err, "campaign fetch for advice failed, using demo data");
            demo::demo_campaigns()
        }
    }
}

/// Feedback digest for prompt calibration. A storage failure degrades to
/// no digest rather than blocking the recommendation.
async fn feedback_digest(state: &AppState) -> String {
    match state.feedback.summarize().await {
        Ok(summary) => summary.render(),
        Err(err) => {
            warn!(error = %err, "feedback summary unavailable");
            String::new()
        }
    }
}

fn error_response(err: AdpilotError) -> Response {
    let (status, code) = match &err {
        AdpilotError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, Some("RATE_LIMIT")),
        AdpilotError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, None),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, None),
    };
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: err.to_string(),
            code,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use adpilot_advisor::Advisor;
    use adpilot_amazon::AdsClient;
    use adpilot_cache::CampaignCache;
    use adpilot_config::AmazonConfig;
    use adpilot_feedback::FeedbackStore;
    use adpilot_test_utils::{MockOracle, MockReply, StubCampaignSource, sample_campaign};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::server::build_router;

    struct TestHarness {
        state: AppState,
        source: Arc<StubCampaignSource>,
        oracle: Arc<MockOracle>,
        _dir: TempDir,
    }

    fn harness(configured: bool, replies: Vec<MockReply>) -> TestHarness {
        let dir = TempDir::new().unwrap();
        let source = StubCampaignSource::new(vec![sample_campaign("101", "Alpha")]);
        let oracle = MockOracle::with_replies(replies);
        let state = AppState {
            cache: CampaignCache::new(source.clone(), Duration::from_secs(300)),
            ads: Arc::new(AdsClient::new(AmazonConfig::default()).unwrap()),
            feedback: Arc::new(FeedbackStore::new(dir.path().join("feedback.json"), 200, 50)),
            advisor: Arc::new(Advisor::new(oracle.clone())),
            amazon_configured: configured,
            start_time: std::time::Instant::now(),
        };
        TestHarness {
            state,
            source,
            oracle,
            _dir: dir,
        }
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn advice_body() -> Value {
        json!({
            "changeEvents": [],
            "dateRange": { "from": "2026-02-01", "to": "2026-02-28" }
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let h = harness(false, vec![]);
        let (status, body) = get(h.state, "/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unconfigured_campaigns_serve_demo_without_network() {
        let h = harness(false, vec![]);
        let (status, body) =
            get(h.state, "/v1/campaigns?from=2026-02-01&to=2026-02-28").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "mock");
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(h.source.full_calls(), 0);
    }

    #[tokio::test]
    async fn configured_campaigns_read_through_the_cache() {
        let h = harness(true, vec![]);
        let (_, first) = get(
            h.state.clone(),
            "/v1/campaigns?from=2026-02-01&to=2026-02-28",
        )
        .await;
        assert_eq!(first["source"], "live");
        assert_eq!(first["phase"], "all");
        assert_eq!(first["metricsAvailable"], true);
        assert_eq!(first["data"][0]["name"], "Alpha");

        let (_, second) = get(
            h.state.clone(),
            "/v1/campaigns?from=2026-02-01&to=2026-02-28",
        )
        .await;
        assert_eq!(second["phase"], "cached");
        assert_eq!(second["cached"], true);
        assert_eq!(h.source.full_calls(), 1);
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_to_demo_with_error() {
        let h = harness(true, vec![]);
        h.source.fail_next_full();
        let (status, body) =
            get(h.state, "/v1/campaigns?from=2026-02-01&to=2026-02-28").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "mock");
        assert!(body["error"].as_str().unwrap().contains("500"));
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn feedback_round_trips_through_the_store() {
        let h = harness(false, vec![]);
        let entry = json!({
            "id": "fb-1",
            "campaignId": "demo-2",
            "campaignName": "Demo - Yoga Mats Exact",
            "suggestionType": "lower_bid",
            "suggestionTitle": "Lower bid to contain ACOS",
            "action": "approve"
        });

        let (status, saved) = post(h.state.clone(), "/v1/feedback", entry).await;
        assert_eq!(status, StatusCode::OK);
        assert!(saved["saved"]["timestamp"].is_string());

        let (_, listed) = get(h.state, "/v1/feedback").await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0]["id"], "fb-1");
    }

    #[tokio::test]
    async fn suggestions_return_parsed_oracle_output() {
        let h = harness(
            false,
            vec![MockReply::Text(
                r#"{"campaignSuggestions":[{"campaignId":"demo-1","suggestions":[]}]}"#.into(),
            )],
        );
        let (status, body) = post(h.state, "/v1/suggestions", advice_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(
            body["data"]["campaignSuggestions"][0]["campaignId"],
            "demo-1"
        );
    }

    #[tokio::test]
    async fn recorded_feedback_reaches_the_prompt() {
        let h = harness(
            false,
            vec![MockReply::Text(r#"{"campaignSuggestions":[]}"#.into())],
        );
        let entry = json!({
            "id": "fb-1",
            "campaignId": "demo-2",
            "campaignName": "Demo - Yoga Mats Exact",
            "suggestionType": "lower_bid",
            "suggestionTitle": "Lower bid to contain ACOS",
            "action": "deny",
            "userNote": "keeping visibility for the launch"
        });
        post(h.state.clone(), "/v1/feedback", entry).await;
        post(h.state, "/v1/suggestions", advice_body()).await;

        let prompts = h.oracle.prompts().await;
        assert!(prompts[0].contains("Seller Feedback History"));
        assert!(prompts[0].contains("keeping visibility for the launch"));
    }

    #[tokio::test]
    async fn rate_limit_maps_to_429_with_code() {
        let h = harness(false, vec![MockReply::RateLimited]);
        let (status, body) = post(h.state, "/v1/suggestions", advice_body()).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "RATE_LIMIT");
    }

    #[tokio::test]
    async fn insights_return_portfolio_summary() {
        let h = harness(
            false,
            vec![MockReply::Text(
                r#"{
                    "insights": [{
                        "campaignId": "demo-2",
                        "campaignName": "Demo - Yoga Mats Exact",
                        "category": "declining",
                        "severity": "warning",
                        "confidenceScore": 80
                    }],
                    "portfolioSummary": {
                        "overallHealth": "mixed",
                        "topOpportunity": "Scale earbuds",
                        "biggestRisk": "Yoga mats ACOS"
                    }
                }"#
                .into(),
            )],
        );
        let (status, body) = post(h.state, "/v1/insights", advice_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["insights"][0]["severity"], "warning");
        assert_eq!(body["data"]["portfolioSummary"]["overallHealth"], "mixed");
    }

    #[tokio::test]
    async fn unparseable_oracle_output_is_a_server_error() {
        let h = harness(false, vec![MockReply::Text("no json at all".into())]);
        let (status, body) = post(h.state, "/v1/insights", advice_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["code"].is_null());
    }

    /// An Ads client pointed at a wiremock server with a valid token mock
    /// already mounted.
    async fn live_ads_client(server: &MockServer) -> Arc<AdsClient> {
        Mock::given(method("POST"))
            .and(path("/auth/o2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"access_token": "tok-123", "expires_in": 3600}),
            ))
            .mount(server)
            .await;
        Arc::new(
            AdsClient::new(AmazonConfig {
                client_id: "client-id".into(),
                client_secret: "client-secret".into(),
                refresh_token: "refresh-token".into(),
                profile_id: "profile-1".into(),
                api_base: server.uri(),
                token_url: format!("{}/auth/o2/token", server.uri()),
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn profiles_without_credentials_are_service_unavailable() {
        let h = harness(false, vec![]);
        let (status, body) = get(h.state, "/v1/profiles").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn profiles_route_serves_the_live_upstream() {
        let server = MockServer::start().await;
        let mut h = harness(true, vec![]);
        h.state.ads = live_ads_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/profiles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"profileId": 42, "countryCode": "US",
                 "accountInfo": {"id": "A1SELLER", "type": "seller", "name": "Test Seller"}}
            ])))
            .mount(&server)
            .await;

        let (status, body) = get(h.state, "/v1/profiles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0]["profileId"], 42);
        assert_eq!(body["data"][0]["accountInfo"]["type"], "seller");
    }

    #[tokio::test]
    async fn products_route_serves_the_live_upstream() {
        let server = MockServer::start().await;
        let mut h = harness(true, vec![]);
        h.state.ads = live_ads_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/sp/productAds/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "productAds": [
                    {"adId": 10, "campaignId": 1, "asin": "B000TEST01",
                     "state": "ENABLED", "sku": "SKU-01"}
                ]
            })))
            .mount(&server)
            .await;

        let (status, body) = get(h.state, "/v1/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["asin"], "B000TEST01");
        assert_eq!(body["data"][0]["sku"], "SKU-01");
    }

    #[tokio::test]
    async fn changes_endpoint_serves_demo_events() {
        let h = harness(false, vec![]);
        let (status, body) = get(h.state, "/v1/changes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["campaignId"], "demo-2");
    }
}
