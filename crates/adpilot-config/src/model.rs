// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Adpilot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

use adpilot_core::AdpilotError;

/// Top-level Adpilot configuration.
///
/// Loaded from TOML files with environment variable overrides. All sections
/// are optional and default to sensible values; the service runs entirely on
/// demo data when no credentials are configured.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdpilotConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Amazon Ads API credentials and endpoints.
    #[serde(default)]
    pub amazon: AmazonConfig,

    /// Gemini oracle settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Campaign cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Feedback store settings.
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Amazon Ads API configuration.
///
/// All four credential fields must be present for the live data path; when
/// any is empty the upstream client fails fast with
/// [`AdpilotError::NotConfigured`] and callers serve demo data instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AmazonConfig {
    /// Login-with-Amazon client id.
    #[serde(default)]
    pub client_id: String,

    /// Login-with-Amazon client secret.
    #[serde(default)]
    pub client_secret: String,

    /// Long-lived refresh token obtained during the (out-of-scope) OAuth
    /// setup flow.
    #[serde(default)]
    pub refresh_token: String,

    /// Advertising profile id used as the API scope.
    #[serde(default)]
    pub profile_id: String,

    /// Regional Ads API base URL.
    #[serde(default = "default_ads_api_base")]
    pub api_base: String,

    /// LwA token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for AmazonConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            profile_id: String::new(),
            api_base: default_ads_api_base(),
            token_url: default_token_url(),
        }
    }
}

impl AmazonConfig {
    /// True when all credential fields are non-empty.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.refresh_token.is_empty()
            && !self.profile_id.is_empty()
    }

    /// Fails fast, before any network attempt, when credentials are absent.
    pub fn require_configured(&self) -> Result<(), AdpilotError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(AdpilotError::NotConfigured("amazon ads"))
        }
    }
}

fn default_ads_api_base() -> String {
    // NA region.
    "https://advertising-api.amazon.com".to_string()
}

fn default_token_url() -> String {
    "https://api.amazon.com/auth/o2/token".to_string()
}

/// Gemini oracle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. Empty means the oracle path is unconfigured.
    #[serde(default)]
    pub api_key: String,

    /// Models tried in priority order; each rate limit rotates to the next.
    #[serde(default = "default_model_priority")]
    pub model_priority: Vec<String>,

    /// Sampling temperature for recommendation generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Generative Language API base URL.
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model_priority: default_model_priority(),
            temperature: default_temperature(),
            api_base: default_gemini_api_base(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.model_priority.is_empty()
    }

    /// Fails fast, before any network attempt, when the oracle key is absent.
    pub fn require_configured(&self) -> Result<(), AdpilotError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(AdpilotError::NotConfigured("gemini"))
        }
    }
}

fn default_model_priority() -> Vec<String> {
    // flash is fastest, flash-8b is free-tier friendly.
    vec![
        "gemini-1.5-flash".to_string(),
        "gemini-1.5-flash-8b".to_string(),
        "gemini-pro".to_string(),
    ]
}

fn default_temperature() -> f32 {
    0.3
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Campaign cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Age in seconds past which a cached entry is stale and a read
    /// triggers a background refresh.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    300
}

/// Feedback store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Path of the JSON feedback log.
    #[serde(default = "default_feedback_path")]
    pub path: String,

    /// Maximum retained entries; older entries are discarded at write time.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// How many recent entries feed the calibration digest.
    #[serde(default = "default_summary_window")]
    pub summary_window: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            path: default_feedback_path(),
            max_entries: default_max_entries(),
            summary_window: default_summary_window(),
        }
    }
}

fn default_feedback_path() -> String {
    "data/ai-feedback.json".to_string()
}

fn default_max_entries() -> usize {
    200
}

fn default_summary_window() -> usize {
    50
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8480
}
