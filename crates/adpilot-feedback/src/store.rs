// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded JSON-file feedback log.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use adpilot_core::AdpilotError;

use crate::summary::FeedbackSummary;

/// What the seller did with a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Approve,
    Deny,
    Modify,
}

/// One recorded seller decision on a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub suggestion_type: String,
    pub suggestion_title: String,
    pub action: FeedbackAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Set by the store at append time when the caller omits it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Feedback log backed by a single JSON array on disk.
///
/// Every append is a read-modify-write of the whole file, truncated to the
/// most recent `max_entries`. There is no cross-process locking; the host
/// process is assumed to be the only writer.
pub struct FeedbackStore {
    path: PathBuf,
    max_entries: usize,
    summary_window: usize,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize, summary_window: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
            summary_window,
        }
    }

    /// Returns the full retained log. A missing file means no feedback has
    /// been recorded yet and yields an empty list; a corrupt file is
    /// treated the same so one bad write cannot wedge every request.
    pub async fn read_all(&self) -> Result<Vec<FeedbackEntry>, AdpilotError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(AdpilotError::Storage {
                    source: Box::new(err),
                });
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable feedback log, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Appends one entry, stamping the current time when the caller left
    /// `timestamp` unset, and truncates the log to the most recent
    /// `max_entries`. Returns the entry as stored.
    pub async fn append(&self, mut entry: FeedbackEntry) -> Result<FeedbackEntry, AdpilotError> {
        if entry.timestamp.is_none() {
            entry.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        }

        let mut entries = self.read_all().await?;
        entries.push(entry.clone());
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }
        self.write_entries(&entries).await?;

        info!(
            action = ?entry.action,
            title = %entry.suggestion_title,
            campaign = %entry.campaign_name,
            "feedback recorded"
        );
        Ok(entry)
    }

    /// Digests the most recent `summary_window` entries into per-action
    /// buckets for the recommendation prompt.
    pub async fn summarize(&self) -> Result<FeedbackSummary, AdpilotError> {
        let entries = self.read_all().await?;
        Ok(FeedbackSummary::from_entries(entries, self.summary_window))
    }

    async fn write_entries(&self, entries: &[FeedbackEntry]) -> Result<(), AdpilotError> {
        if let Some(parent) = self.path.parent() {
            if parent != Path::new("") {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| AdpilotError::Storage {
                        source: Box::new(err),
                    })?;
            }
        }
        let body = serde_json::to_vec_pretty(entries).map_err(|err| AdpilotError::Storage {
            source: Box::new(err),
        })?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|err| AdpilotError::Storage {
                source: Box::new(err),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(id: u32, action: FeedbackAction) -> FeedbackEntry {
        FeedbackEntry {
            id: format!("fb-{id}"),
            campaign_id: "101".into(),
            campaign_name: "Alpha".into(),
            suggestion_type: "budget".into(),
            suggestion_title: format!("Suggestion {id}"),
            action,
            user_note: None,
            current_value: Some(20.0),
            recommended_value: Some(28.0),
            unit: Some("$".into()),
            timestamp: None,
        }
    }

    fn store_in(dir: &TempDir) -> FeedbackStore {
        FeedbackStore::new(dir.path().join("feedback.json"), 200, 50)
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_stamps_missing_timestamp_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let saved = store.append(entry(1, FeedbackAction::Approve)).await.unwrap();
        assert!(saved.timestamp.is_some());

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], saved);
    }

    #[tokio::test]
    async fn caller_timestamp_is_kept() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut stamped = entry(1, FeedbackAction::Deny);
        stamped.timestamp = Some("2026-02-01T09:30:00.000Z".into());
        let saved = store.append(stamped).await.unwrap();
        assert_eq!(saved.timestamp.as_deref(), Some("2026-02-01T09:30:00.000Z"));
    }

    #[tokio::test]
    async fn log_is_bounded_to_most_recent_entries() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for id in 1..=250 {
            store.append(entry(id, FeedbackAction::Approve)).await.unwrap();
        }

        let all = store.read_all().await.unwrap();
        assert_eq!(all.len(), 200);
        assert_eq!(all.first().unwrap().id, "fb-51");
        assert_eq!(all.last().unwrap().id, "fb-250");
    }

    #[tokio::test]
    async fn corrupt_log_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = FeedbackStore::new(&path, 200, 50);
        assert!(store.read_all().await.unwrap().is_empty());

        // Appending over a corrupt log starts a clean array.
        store.append(entry(1, FeedbackAction::Modify)).await.unwrap();
        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stored_file_uses_wire_field_names() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append(entry(7, FeedbackAction::Approve)).await.unwrap();

        let raw = tokio::fs::read_to_string(dir.path().join("feedback.json"))
            .await
            .unwrap();
        assert!(raw.contains("\"campaignName\""));
        assert!(raw.contains("\"suggestionTitle\""));
        assert!(raw.contains("\"action\": \"approve\""));
        assert!(!raw.contains("userNote"), "absent optionals are omitted");
    }
}
