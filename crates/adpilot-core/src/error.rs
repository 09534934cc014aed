// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Adpilot workspace.

use thiserror::Error;

/// The primary error type used across Adpilot's data-acquisition and
/// recommendation pipeline.
///
/// Callers branch on the variant to pick the degradation path: an
/// unconfigured-credentials error substitutes demo data without any network
/// attempt, an upstream error substitutes demo data after the fact, and the
/// oracle-side variants surface to the seller as distinct conditions
/// (wait vs. retry vs. report a bug).
#[derive(Debug, Error)]
pub enum AdpilotError {
    /// Required upstream credentials are absent. Raised before any network
    /// call is attempted.
    #[error("{0} credentials not configured")]
    NotConfigured(&'static str),

    /// Non-2xx response from an upstream endpoint. Carries the HTTP status
    /// and response body for diagnostics.
    #[error("upstream request failed ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The report poll loop exhausted its attempt budget without reaching a
    /// terminal status. Distinct from [`AdpilotError::ReportFailed`] so
    /// callers can explain "still processing" vs. "broke".
    #[error("report {report_id} timed out after {attempts} polls")]
    ReportTimeout { report_id: String, attempts: u32 },

    /// The upstream explicitly reported the job as failed. Not retried.
    #[error("report generation failed: {reason}")]
    ReportFailed { reason: String },

    /// The model rate limit persisted through the retry budget and the
    /// whole fallback list. User-actionable: wait a minute and retry.
    #[error("model rate limit reached after trying {models_tried} model(s); wait a minute and retry")]
    RateLimited { models_tried: usize },

    /// The model response was not valid JSON even after code-fence
    /// extraction.
    #[error("unparseable model response: {0}")]
    UnparseableResponse(String),

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Feedback-store persistence errors.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdpilotError {
    /// True when the error means "credentials were never configured", the
    /// condition under which callers skip the live data path entirely.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, AdpilotError::NotConfigured(_))
    }

    /// True when the error is the distinct, user-actionable rate-limit
    /// condition from the oracle boundary.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, AdpilotError::RateLimited { .. })
    }
}
