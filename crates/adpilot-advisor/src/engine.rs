// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Advisor: prompt in, typed recommendation out.

use std::sync::Arc;

use tracing::info;

use adpilot_core::{AdpilotError, Oracle};

use crate::prompt::{PromptInputs, build_insights_prompt, build_suggestions_prompt};
use crate::response::{InsightsResponse, SuggestionsResponse, parse_insights, parse_suggestions};

/// Runs the two recommendation request types against whatever oracle is
/// wired in. Rate-limit handling and model fallback live behind the
/// [`Oracle`] seam; unparseable responses surface as
/// [`AdpilotError::UnparseableResponse`].
pub struct Advisor {
    oracle: Arc<dyn Oracle>,
}

impl Advisor {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Per-campaign structured suggestions.
    pub async fn campaign_suggestions(
        &self,
        inputs: &PromptInputs<'_>,
    ) -> Result<SuggestionsResponse, AdpilotError> {
        let prompt = build_suggestions_prompt(inputs)?;
        let text = self.oracle.generate(&prompt).await?;
        let response = parse_suggestions(&text)?;
        info!(
            campaigns = inputs.campaigns.len(),
            suggestion_groups = response.campaign_suggestions.len(),
            "campaign suggestions generated"
        );
        Ok(response)
    }

    /// Timeline-aware portfolio insights.
    pub async fn insights(
        &self,
        inputs: &PromptInputs<'_>,
    ) -> Result<InsightsResponse, AdpilotError> {
        let prompt = build_insights_prompt(inputs)?;
        let text = self.oracle.generate(&prompt).await?;
        let response = parse_insights(&text)?;
        info!(
            campaigns = inputs.campaigns.len(),
            insights = response.insights.len(),
            "insights generated"
        );
        Ok(response)
    }
}
