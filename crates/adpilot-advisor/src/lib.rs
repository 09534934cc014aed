// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recommendation engine plumbing.
//!
//! Assembles the structured analysis prompts (campaign KPI snapshots,
//! change history, date ranges, seller feedback digest), hands them to the
//! oracle seam, and parses the JSON it returns, tolerating markdown code
//! fences. The reasoning itself lives in the oracle; this crate only
//! prepares inputs and validates output shape.

pub mod engine;
pub mod prompt;
pub mod response;

pub use engine::Advisor;
pub use prompt::PromptInputs;
pub use response::{InsightsResponse, SuggestionsResponse};
