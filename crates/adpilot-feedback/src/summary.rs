// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calibration digest over the recent feedback window.

use std::fmt::Write as _;

use serde::Serialize;

use crate::store::{FeedbackAction, FeedbackEntry};

/// The recent feedback window partitioned by seller action.
///
/// Feeds the recommendation prompt so the oracle can steer toward what the
/// seller has been approving and away from what they keep denying. The
/// digest is purely factual; no weighting is computed here.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub approved: Vec<FeedbackEntry>,
    pub denied: Vec<FeedbackEntry>,
    pub modified: Vec<FeedbackEntry>,
}

impl FeedbackSummary {
    /// Partitions the most recent `window` entries by action. `entries`
    /// must be in append order (oldest first), as the store keeps them.
    pub fn from_entries(entries: Vec<FeedbackEntry>, window: usize) -> Self {
        let skip = entries.len().saturating_sub(window);
        let mut summary = Self::default();
        for entry in entries.into_iter().skip(skip) {
            match entry.action {
                FeedbackAction::Approve => summary.approved.push(entry),
                FeedbackAction::Deny => summary.denied.push(entry),
                FeedbackAction::Modify => summary.modified.push(entry),
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty() && self.denied.is_empty() && self.modified.is_empty()
    }

    /// Renders the digest block injected ahead of a recommendation
    /// request. Empty when there is no feedback to report.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = String::from("Seller feedback on past recommendations:\n");
        render_bucket(&mut out, "APPROVED", &self.approved);
        render_bucket(&mut out, "DENIED", &self.denied);
        render_bucket(&mut out, "MODIFIED", &self.modified);
        out
    }
}

fn render_bucket(out: &mut String, label: &str, entries: &[FeedbackEntry]) {
    if entries.is_empty() {
        return;
    }
    let _ = writeln!(out, "{label} ({}):", entries.len());
    for entry in entries {
        let _ = write!(
            out,
            "- \"{}\" ({}) on campaign \"{}\"",
            entry.suggestion_title, entry.suggestion_type, entry.campaign_name
        );
        if let Some(note) = &entry.user_note {
            let _ = write!(out, " — seller note: {note}");
        }
        out.push('\n');
    }
}
