// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generateContent endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use adpilot_config::GeminiConfig;
use adpilot_core::{AdpilotError, Oracle};

/// Attempt budget per generate call. Each rate-limited attempt rotates the
/// fallback cursor before retrying.
const MAX_ATTEMPTS: usize = 3;

/// Oracle client over the Generative Language API.
///
/// The fallback cursor is sticky: once a model has rate-limited and the
/// cursor moved past it, later requests start from the rotated model and
/// never move back until the process restarts. Construction does not
/// validate the key; every call fails fast with
/// [`AdpilotError::NotConfigured`] when it is absent.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    cursor: AtomicUsize,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Creates a new oracle client from the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AdpilotError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AdpilotError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            cursor: AtomicUsize::new(0),
        })
    }

    /// The model the next attempt will use.
    fn current_model(&self) -> &str {
        let idx = self
            .cursor
            .load(Ordering::Acquire)
            .min(self.config.model_priority.len() - 1);
        &self.config.model_priority[idx]
    }

    /// Advances the fallback cursor. Returns false when the priority list
    /// is exhausted.
    fn rotate(&self) -> bool {
        let last = self.config.model_priority.len() - 1;
        self.cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                (cur < last).then_some(cur + 1)
            })
            .is_ok()
    }

    async fn generate_once(&self, model: &str, prompt: &str) -> Result<String, AdpilotError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "responseMimeType": "application/json",
            },
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdpilotError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(request_error)?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AdpilotError::Internal("model response contained no text".into()))?;
        Ok(text)
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdpilotError> {
        self.config.require_configured()?;

        let mut models_tried = 0;
        for attempt in 0..MAX_ATTEMPTS {
            let model = self.current_model().to_string();
            debug!(model = %model, attempt, "oracle generate");
            match self.generate_once(&model, prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if is_rate_limit_signal(&err) => {
                    models_tried += 1;
                    warn!(model = %model, attempt, "model rate limited");
                    if !self.rotate() || attempt == MAX_ATTEMPTS - 1 {
                        return Err(AdpilotError::RateLimited { models_tried });
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Err(AdpilotError::RateLimited { models_tried })
    }
}

/// Recognizes a rate-limit response by status or by the markers the API
/// embeds in error bodies.
fn is_rate_limit_signal(err: &AdpilotError) -> bool {
    match err {
        AdpilotError::Upstream { status: 429, .. } => true,
        AdpilotError::Upstream { body, .. } => {
            body.contains("Too Many Requests") || body.contains("RESOURCE_EXHAUSTED")
        }
        _ => false,
    }
}

fn request_error(err: reqwest::Error) -> AdpilotError {
    AdpilotError::Upstream {
        status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        body: err.to_string(),
    }
}
