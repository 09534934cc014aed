// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for the two request types.
//!
//! Campaign snapshots are serialized from the already-derived, rounded KPI
//! sets; raw metric rows never reach the prompt. Campaigns without
//! previous-period data omit the `previous` block entirely so the oracle
//! cannot mistake "no prior data" for "no change".

use serde::Serialize;
use serde_json::to_string_pretty;

use adpilot_core::types::{BiddingStrategy, CampaignStatus, CampaignType};
use adpilot_core::{AdpilotError, Campaign, ChangeEvent, DateRange, KpiSet};

const SUGGESTIONS_SYSTEM_PROMPT: &str = "\
You are an expert Amazon PPC (Pay-Per-Click) advertising analyst.
You think like a senior PPC manager with 10+ years of experience optimizing Sponsored Products campaigns.

Your job is to analyze campaign performance data across two time periods, detect changes in the change history,
and generate STRUCTURED, ACTIONABLE suggestions for each campaign.

Rules:
1. Always explain WHY you're making a suggestion (data-driven reasoning).
2. Detect if a performance change was caused by a USER ACTION (bid/budget change) or by the MARKET.
3. Warn about over-optimization (ACOS improved but volume collapsed).
4. Warn about Top of Search loss (impressions drop sharply after bid decrease).
5. Scale winning campaigns (high ROAS + low spend = underutilized budget).
6. Be conservative: prefer partial bid adjustments over extreme changes.
7. Return only valid JSON.";

const INSIGHTS_SYSTEM_PROMPT: &str = "\
You are an expert Amazon PPC analyst with 10+ years of experience.
You think across TIME, not just looking at current metrics, but understanding WHAT CHANGED, WHY it changed, and WHAT TO DO.

You are NOT a rules-based dashboard. You reason like a human PPC manager who:
- Tracks the timeline of events (when bids/budgets changed)
- Knows when a performance drop was caused by their own action vs. the market
- Detects over-optimization (ACOS improved but volume collapsed)
- Detects Top of Search loss (impressions drop sharply after bid cuts)
- Celebrates wins and scales them
- Always explains reasoning clearly

IMPORTANT: Return only valid JSON, no markdown.";

const SUGGESTIONS_INSTRUCTIONS: &str = r#"## Instructions
For EACH campaign, analyze:
1. Current vs previous period metrics and the % changes (skip the comparison when no previous block is present)
2. Whether any change event correlates with a performance shift
3. What the likely cause is (seller action vs market)
4. What the best action is (with specific numbers)

Return a JSON object with this exact structure:
{
  "campaignSuggestions": [
    {
      "campaignId": "string",
      "suggestions": [
        {
          "type": "raise_bid" | "lower_bid" | "increase_budget" | "decrease_budget" | "pause_campaign" | "enable_campaign" | "add_negative_keyword" | "adjust_placement",
          "title": "short title (max 10 words)",
          "description": "1-2 sentence description",
          "rationale": "data-driven explanation referencing specific metrics and changes",
          "impact": "estimated outcome (e.g. 'Est. ACOS improvement from 70% to 50-55%')",
          "confidence": "High" | "Medium" | "Low",
          "currentValue": number | null,
          "recommendedValue": number | null,
          "unit": "$" | "%" | null
        }
      ]
    }
  ]
}

Only include suggestions where there is a genuine actionable opportunity.
If a campaign is performing well with no changes needed, return an empty suggestions array for it.
Include at most 2 suggestions per campaign."#;

const INSIGHTS_INSTRUCTIONS: &str = r#"## Your Task
Generate timeline-aware insights. For each significant finding, produce a structured insight.

Focus on:
1. **Top of Search Loss**: impressions dropped significantly after a bid decrease
2. **Over-Optimization**: ACOS improved but volume (orders/sales) collapsed
3. **Declining campaigns**: multiple metrics deteriorating, possibly after changes
4. **Unprofitable campaigns**: ACOS > 80%, ROAS < 1.2, losing money
5. **Scaling opportunities**: high ROAS + low spend + strong CVR = scale immediately

For each insight, you MUST produce a specific recommended action with exact values
(e.g. "raise bid from $2.24 to $2.65" not just "raise bids").

Return this exact JSON structure:
{
  "insights": [
    {
      "campaignId": "string",
      "campaignName": "string",
      "category": "top_of_search_loss" | "over_optimized" | "declining" | "dying" | "improving" | "budget_limited",
      "severity": "critical" | "warning" | "opportunity" | "info",
      "title": "Concise title (max 12 words)",
      "whatChanged": "What metrics changed and by how much (include specific numbers + % changes)",
      "likelyCause": "Root cause analysis. Was this caused by a seller action (reference the specific change event date + values) or market forces? Be specific.",
      "recommendedAction": "Step-by-step recommendation with specific values, e.g. 'Raise bid from $2.24 to $2.65 (+18%). Monitor Top of Search impression share for 3-5 days.'",
      "confidence": "High" | "Medium" | "Low",
      "confidenceScore": 0-100,
      "metrics": [
        {
          "label": "ACOS" | "ROAS" | "Impressions" | "Clicks" | "Orders" | "Sales" | "Spend" | "CPC" | "CVR",
          "current": number,
          "previous": number,
          "change": number (% change, positive = increased, negative = decreased),
          "unit": "$" | "%" | "x" | ""
        }
      ],
      "structuredAction": {
        "type": "raise_bid" | "lower_bid" | "increase_budget" | "decrease_budget" | "pause_campaign" | "enable_campaign" | "add_negative_keyword" | "adjust_placement",
        "title": "Action title",
        "description": "What exactly to do",
        "rationale": "Why this action based on the data",
        "impact": "Expected outcome",
        "confidence": "High" | "Medium" | "Low",
        "currentValue": number | null,
        "recommendedValue": number | null,
        "unit": "$" | "%" | null
      }
    }
  ],
  "portfolioSummary": {
    "overallHealth": "good" | "declining" | "mixed" | "critical",
    "topOpportunity": "string - single most impactful action for the whole portfolio",
    "biggestRisk": "string - the most urgent problem to fix"
  }
}

Generate insights only for campaigns with genuinely notable changes or opportunities.
Sort insights by severity (critical first)."#;

/// Everything a prompt build needs. The feedback digest may be empty, in
/// which case no feedback section is emitted.
pub struct PromptInputs<'a> {
    pub campaigns: &'a [Campaign],
    pub change_events: &'a [ChangeEvent],
    pub range: &'a DateRange,
    pub feedback_digest: &'a str,
}

/// Campaign snapshot serialized into the suggestions prompt. Identity and
/// budget context plus the derived KPI sets, nothing else.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionSnapshot<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    campaign_type: CampaignType,
    status: CampaignStatus,
    daily_budget: f64,
    bidding_strategy: BiddingStrategy,
    current: &'a KpiSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<&'a KpiSet>,
}

/// Leaner snapshot for the insights prompt, with the campaign's own change
/// events inlined for timeline correlation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightSnapshot<'a> {
    id: &'a str,
    name: &'a str,
    current: &'a KpiSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<&'a KpiSet>,
    related_changes: Vec<&'a ChangeEvent>,
}

/// Builds the per-campaign suggestions prompt.
pub fn build_suggestions_prompt(inputs: &PromptInputs<'_>) -> Result<String, AdpilotError> {
    let snapshots: Vec<SuggestionSnapshot<'_>> = inputs
        .campaigns
        .iter()
        .map(|c| SuggestionSnapshot {
            id: &c.id,
            name: &c.name,
            campaign_type: c.campaign_type,
            status: c.status,
            daily_budget: c.daily_budget,
            bidding_strategy: c.bidding_strategy,
            current: &c.current,
            previous: c.previous.as_ref(),
        })
        .collect();

    let mut prompt = String::from(SUGGESTIONS_SYSTEM_PROMPT);
    push_feedback_section(&mut prompt, inputs.feedback_digest);
    prompt.push_str(&format!(
        "\n\n## Date Range\nCurrent period: {} to {}\n",
        inputs.range.from, inputs.range.to
    ));
    prompt.push_str(&format!(
        "\n## Recent Change History (bid/budget/status changes made by seller)\n{}\n",
        render_json(inputs.change_events)?
    ));
    prompt.push_str(&format!(
        "\n## Campaign Performance Data\n{}\n\n",
        render_json(&snapshots)?
    ));
    prompt.push_str(SUGGESTIONS_INSTRUCTIONS);
    Ok(prompt)
}

/// Builds the portfolio insights prompt. The comparison period is derived
/// from the current range.
pub fn build_insights_prompt(inputs: &PromptInputs<'_>) -> Result<String, AdpilotError> {
    let comparison = inputs.range.previous_period()?;
    let snapshots: Vec<InsightSnapshot<'_>> = inputs
        .campaigns
        .iter()
        .map(|c| InsightSnapshot {
            id: &c.id,
            name: &c.name,
            current: &c.current,
            previous: c.previous.as_ref(),
            related_changes: inputs
                .change_events
                .iter()
                .filter(|e| e.campaign_id == c.id)
                .collect(),
        })
        .collect();

    let mut prompt = String::from(INSIGHTS_SYSTEM_PROMPT);
    push_feedback_section(&mut prompt, inputs.feedback_digest);
    prompt.push_str(&format!(
        "\n\n## Analysis Context\nCurrent period: {} to {}\nPrevious period: {} to {}\n",
        inputs.range.from, inputs.range.to, comparison.from, comparison.to
    ));
    prompt.push_str(&format!(
        "\n## Change History (actual changes made by the seller)\n{}\n",
        render_json(inputs.change_events)?
    ));
    prompt.push_str(&format!(
        "\n## All Campaign Performance Data\n{}\n\n",
        render_json(&snapshots)?
    ));
    prompt.push_str(INSIGHTS_INSTRUCTIONS);
    Ok(prompt)
}

fn push_feedback_section(prompt: &mut String, digest: &str) {
    if !digest.is_empty() {
        prompt.push_str("\n\n## Seller Feedback History\n");
        prompt.push_str(
            "Calibrate recommendations against these past seller decisions. Avoid repeating \
             suggestion patterns the seller has denied; lean toward patterns they approve.\n",
        );
        prompt.push_str(digest);
    }
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AdpilotError> {
    to_string_pretty(value).map_err(|e| AdpilotError::Internal(format!("prompt serialization: {e}")))
}
