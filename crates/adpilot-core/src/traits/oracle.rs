// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Oracle trait for the external recommendation-generation call.

use async_trait::async_trait;

use crate::error::AdpilotError;

/// A black-box text completion oracle.
///
/// Implementations must surface rate limiting as
/// [`AdpilotError::RateLimited`] and only after exhausting their own retry
/// and fallback budgets, so the caller can show a specific "wait a minute"
/// message instead of a generic failure.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Sends a prompt and returns the raw response text, expected (but not
    /// guaranteed) to parse as JSON.
    async fn generate(&self, prompt: &str) -> Result<String, AdpilotError>;
}
