// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Oracle response parsing.
//!
//! The oracle is asked for bare JSON but routinely wraps it in a markdown
//! code fence anyway. Parsing tries the raw text first, then the fence
//! contents, then gives up with a distinct unparseable-response error.
//! Shape validation stops at the top level; a malformed field inside one
//! suggestion is the caller's concern, so entry fields are lenient and
//! default to empty.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use adpilot_core::AdpilotError;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\n?([\s\S]*?)\n?```").expect("static code-fence pattern")
});

/// One actionable recommendation, either standalone (suggestions request)
/// or embedded as an insight's structured action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub recommended_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Suggestions grouped per campaign. An empty `suggestions` list is a valid
/// "nothing to do" answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSuggestions {
    #[serde(default)]
    pub campaign_id: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Top-level shape of a suggestions response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub campaign_suggestions: Vec<CampaignSuggestions>,
}

/// A current/previous metric pair with its percent change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub previous: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub unit: String,
}

/// One timeline-aware finding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(default)]
    pub campaign_id: String,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub what_changed: String,
    #[serde(default)]
    pub likely_cause: String,
    #[serde(default)]
    pub recommended_action: String,
    #[serde(default)]
    pub confidence: String,
    /// Clamped to 0..=100 during parsing.
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub metrics: Vec<MetricDelta>,
    #[serde(default)]
    pub structured_action: Option<Suggestion>,
}

/// Portfolio-level rollup accompanying the insights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    #[serde(default)]
    pub overall_health: String,
    #[serde(default)]
    pub top_opportunity: String,
    #[serde(default)]
    pub biggest_risk: String,
}

/// Top-level shape of an insights response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub portfolio_summary: Option<PortfolioSummary>,
}

/// Parses a suggestions response from raw oracle text.
pub fn parse_suggestions(text: &str) -> Result<SuggestionsResponse, AdpilotError> {
    let value = extract_json(text)?;
    serde_json::from_value(value)
        .map_err(|e| AdpilotError::UnparseableResponse(format!("suggestions shape: {e}")))
}

/// Parses an insights response from raw oracle text, clamping confidence
/// scores into 0..=100.
pub fn parse_insights(text: &str) -> Result<InsightsResponse, AdpilotError> {
    let value = extract_json(text)?;
    let mut response: InsightsResponse = serde_json::from_value(value)
        .map_err(|e| AdpilotError::UnparseableResponse(format!("insights shape: {e}")))?;
    for insight in &mut response.insights {
        insight.confidence_score = insight.confidence_score.clamp(0.0, 100.0);
    }
    Ok(response)
}

/// Direct JSON parse first; on failure, the contents of the first markdown
/// code fence.
fn extract_json(text: &str) -> Result<Value, AdpilotError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    if let Some(captures) = CODE_FENCE.captures(text) {
        let inner = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        debug!("oracle response arrived fenced despite JSON mime type");
        if let Ok(value) = serde_json::from_str(inner) {
            return Ok(value);
        }
    }

    Err(AdpilotError::UnparseableResponse(preview(text)))
}

/// First part of the offending text, enough to diagnose without dumping a
/// whole prompt echo into the error.
fn preview(text: &str) -> String {
    const LIMIT: usize = 200;
    let mut end = LIMIT.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    if end < text.len() {
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}
