// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Amazon Ads API.
//!
//! Provides [`AdsClient`] which handles LwA token refresh with caching,
//! the paginated SP v3 listing endpoints, and profile lookup. The async
//! reporting protocol lives in [`crate::report`].

use std::time::{Duration, Instant};

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use adpilot_config::AmazonConfig;
use adpilot_core::AdpilotError;

use crate::types::{
    AdsProfile, CampaignListPage, ListedCampaign, ProductAd, ProductAdListPage, TokenResponse,
};

/// SP v3 media type for campaign listing.
const CAMPAIGN_MEDIA_TYPE: &str = "application/vnd.spCampaign.v3+json";
/// SP v3 media type for product-ad listing.
const PRODUCT_AD_MEDIA_TYPE: &str = "application/vnd.spProductAd.v3+json";
/// Page size for paginated listings.
const PAGE_SIZE: u32 = 100;
/// The cached access token is refreshed this long before its declared expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// HTTP client for Amazon Ads API communication.
///
/// Holds the credential set and a cached LwA access token; requests are
/// scoped to one advertising profile. Construction does not validate
/// credentials -- every operation fails fast with
/// [`AdpilotError::NotConfigured`] when they are absent, before any network
/// attempt, so callers can branch to demo data.
pub struct AdsClient {
    http: reqwest::Client,
    config: AmazonConfig,
    token: Mutex<Option<CachedToken>>,
    pub(crate) poll_interval: Duration,
    pub(crate) max_polls: u32,
}

impl AdsClient {
    /// Creates a new Ads API client from the given configuration.
    pub fn new(config: AmazonConfig) -> Result<Self, AdpilotError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AdpilotError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
            poll_interval: crate::report::POLL_INTERVAL,
            max_polls: crate::report::MAX_POLLS,
        })
    }

    /// Shrinks the report poll interval (for testing the poll loop without
    /// 120 seconds of wall time).
    #[cfg(test)]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub(crate) fn config(&self) -> &AmazonConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns a valid access token, exchanging the refresh token when the
    /// cached one is absent or within 60 seconds of expiry.
    pub(crate) async fn access_token(&self) -> Result<String, AdpilotError> {
        self.config.require_configured()?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + TOKEN_EXPIRY_MARGIN < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        debug!("exchanging LwA refresh token for access token");
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "LwA token refresh failed");
            return Err(AdpilotError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await.map_err(request_error)?;
        let entry = CachedToken {
            token: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        };
        *cached = Some(entry);
        Ok(token.access_token)
    }

    /// Builds an authenticated Ads API request with the profile scope
    /// headers. `path` may be absolute (report download URLs) or relative
    /// to the configured API base.
    pub(crate) async fn ads_request(
        &self,
        method: Method,
        path: &str,
        media_type: &str,
    ) -> Result<reqwest::RequestBuilder, AdpilotError> {
        let token = self.access_token().await?;
        let url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.config.api_base, path)
        };

        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header("Amazon-Advertising-API-ClientId", &self.config.client_id)
            .header("Amazon-Advertising-API-Scope", &self.config.profile_id)
            .header("Content-Type", media_type)
            .header("Accept", media_type))
    }

    /// Lists all Sponsored Products campaigns, following the opaque
    /// continuation token until the upstream stops returning one.
    pub async fn list_campaigns(&self) -> Result<Vec<ListedCampaign>, AdpilotError> {
        let mut all = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page: CampaignListPage = self
                .list_page("/sp/campaigns/list", CAMPAIGN_MEDIA_TYPE, &next_token)
                .await?;
            all.extend(page.campaigns);
            next_token = page.next_token;
            if next_token.is_none() {
                break;
            }
        }

        info!(count = all.len(), "campaign listing complete");
        Ok(all)
    }

    /// Lists advertised products (ASINs). Unlike the campaign listing, a
    /// non-2xx page terminates the loop with the ads collected so far --
    /// the catalog is enrichment, not load-bearing.
    pub async fn list_product_ads(&self) -> Result<Vec<ProductAd>, AdpilotError> {
        let mut all = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let result: Result<ProductAdListPage, AdpilotError> = self
                .list_page("/sp/productAds/list", PRODUCT_AD_MEDIA_TYPE, &next_token)
                .await;
            match result {
                Ok(page) => {
                    all.extend(page.product_ads);
                    next_token = page.next_token;
                    if next_token.is_none() {
                        break;
                    }
                }
                Err(err) if err.is_not_configured() => return Err(err),
                Err(err) => {
                    warn!(error = %err, "product ad listing page failed, keeping partial result");
                    break;
                }
            }
        }

        Ok(all)
    }

    /// Fetches the advertising profiles visible to these credentials.
    /// Useful for verifying a credential set maps to the expected account.
    pub async fn list_profiles(&self) -> Result<Vec<AdsProfile>, AdpilotError> {
        let request = self
            .ads_request(Method::GET, "/v2/profiles", "application/json")
            .await?;
        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdpilotError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(request_error)
    }

    /// Fetches one page of a v3 list endpoint.
    async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        media_type: &str,
        next_token: &Option<String>,
    ) -> Result<T, AdpilotError> {
        let mut body = serde_json::json!({
            "maxResults": PAGE_SIZE,
            "stateFilter": { "include": ["ENABLED", "PAUSED"] },
        });
        if let Some(token) = next_token {
            body["nextToken"] = serde_json::Value::String(token.clone());
        }

        let request = self.ads_request(Method::POST, path, media_type).await?;
        let response = request
            .body(body.to_string())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        debug!(path, status = %status, "listing page received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdpilotError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(request_error)
    }
}

/// Maps a transport-level reqwest failure into the upstream error variant.
/// No HTTP status was received, so 0 stands in for "no response".
pub(crate) fn request_error(err: reqwest::Error) -> AdpilotError {
    match err.status() {
        Some(status) => AdpilotError::Upstream {
            status: status.as_u16(),
            body: err.to_string(),
        },
        None => AdpilotError::Upstream {
            status: 0,
            body: err.to_string(),
        },
    }
}
