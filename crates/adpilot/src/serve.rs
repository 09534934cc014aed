// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `adpilot serve` command implementation.
//!
//! Wires the live Amazon campaign source behind the cache, the Gemini
//! oracle behind the advisor, and the feedback store, then hands the lot
//! to the gateway.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use adpilot_advisor::Advisor;
use adpilot_amazon::{AdsClient, AmazonCampaignSource};
use adpilot_cache::CampaignCache;
use adpilot_config::AdpilotConfig;
use adpilot_core::AdpilotError;
use adpilot_feedback::FeedbackStore;
use adpilot_gateway::AppState;
use adpilot_gemini::GeminiClient;

/// Runs the `adpilot serve` command.
pub async fn run_serve(config: AdpilotConfig) -> Result<(), AdpilotError> {
    init_tracing(&config.service.log_level);

    info!("starting adpilot serve");

    let amazon_configured = config.amazon.is_configured();
    if !amazon_configured {
        warn!("amazon ads credentials not configured; campaign endpoints serve demo data");
    }
    if !config.gemini.is_configured() {
        warn!("gemini api key not configured; recommendation endpoints will fail fast");
    }

    let ads_client = Arc::new(AdsClient::new(config.amazon.clone())?);
    let source = Arc::new(AmazonCampaignSource::new(Arc::clone(&ads_client)));
    let cache = CampaignCache::new(source, Duration::from_secs(config.cache.ttl_secs));

    let feedback = Arc::new(FeedbackStore::new(
        &config.feedback.path,
        config.feedback.max_entries,
        config.feedback.summary_window,
    ));

    let oracle = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let advisor = Arc::new(Advisor::new(oracle));

    let state = AppState {
        cache,
        ads: ads_client,
        feedback,
        advisor,
        amazon_configured,
        start_time: std::time::Instant::now(),
    };

    adpilot_gateway::start_server(&config.gateway, state).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adpilot={log_level},warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
