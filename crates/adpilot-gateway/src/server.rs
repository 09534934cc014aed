// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use adpilot_advisor::Advisor;
use adpilot_amazon::AdsClient;
use adpilot_cache::CampaignCache;
use adpilot_config::GatewayConfig;
use adpilot_core::AdpilotError;
use adpilot_feedback::FeedbackStore;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Campaign cache over the live source.
    pub cache: Arc<CampaignCache>,
    /// Ads API client, shared with the campaign source behind the cache.
    /// Serves the profile and product-ad routes directly; fails fast with
    /// `NotConfigured` when credentials are absent.
    pub ads: Arc<AdsClient>,
    /// Persisted feedback log.
    pub feedback: Arc<FeedbackStore>,
    /// Recommendation engine.
    pub advisor: Arc<Advisor>,
    /// Whether Amazon Ads credentials are present. When false, campaign
    /// reads skip the live path entirely and serve demo data.
    pub amazon_configured: bool,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Builds the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::get_health))
        .route("/v1/campaigns", get(handlers::get_campaigns))
        .route("/v1/products", get(handlers::get_products))
        .route("/v1/profiles", get(handlers::get_profiles))
        .route("/v1/changes", get(handlers::get_changes))
        .route(
            "/v1/feedback",
            get(handlers::get_feedback).post(handlers::post_feedback),
        )
        .route("/v1/suggestions", post(handlers::post_suggestions))
        .route("/v1/insights", post(handlers::post_insights))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the configured host:port and serves the API until the process
/// exits.
pub async fn start_server(config: &GatewayConfig, state: AppState) -> Result<(), AdpilotError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AdpilotError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AdpilotError::Internal(format!("gateway server error: {e}")))
}
