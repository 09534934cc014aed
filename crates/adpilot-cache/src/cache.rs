// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache state machine: empty, fresh, stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, warn};

use adpilot_core::types::{DataSource, FetchPhase};
use adpilot_core::{AdpilotError, Campaign, CampaignSource, DateRange};

/// One cached snapshot. Entries are replaced wholesale, never mutated.
struct CacheEntry {
    key: String,
    campaigns: Vec<Campaign>,
    metrics_available: bool,
    fetched_at: Instant,
}

/// What a cache read hands to the request layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReadout {
    pub source: DataSource,
    pub cached: bool,
    /// Seconds since the entry was installed. Absent on a fetch that just
    /// happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
    pub metrics_available: bool,
    pub refreshing: bool,
    pub data: Vec<Campaign>,
}

/// Single-slot cache over a [`CampaignSource`].
///
/// A read sees one of three states:
/// - **empty**: no entry, or the entry's key differs from the requested
///   range. A synchronous fetch runs; failure installs nothing.
/// - **fresh**: matching key, age below TTL. Returned as-is.
/// - **stale**: matching key, age at or past TTL. Returned as-is, plus a
///   single-flight background refresh.
pub struct CampaignCache {
    source: Arc<dyn CampaignSource>,
    entry: ArcSwapOption<CacheEntry>,
    ttl: Duration,
    refreshing: AtomicBool,
}

impl CampaignCache {
    pub fn new(source: Arc<dyn CampaignSource>, ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            entry: ArcSwapOption::const_empty(),
            ttl,
            refreshing: AtomicBool::new(false),
        })
    }

    /// Reads campaigns for `range`, consulting the cached entry first.
    ///
    /// `phase` only matters on a miss: [`FetchPhase::Listing`] serves a
    /// listing-only snapshot immediately and fills in metrics in the
    /// background, the other phases block on the full fetch.
    pub async fn read(
        self: &Arc<Self>,
        range: &DateRange,
        phase: FetchPhase,
    ) -> Result<CacheReadout, AdpilotError> {
        let key = range.cache_key();

        if let Some(entry) = self.entry.load_full() {
            if entry.key == key {
                let age = entry.fetched_at.elapsed();
                if age < self.ttl {
                    return Ok(self.readout(&entry, true, Some(age.as_secs())));
                }
                debug!(key = %key, age_secs = age.as_secs(), "stale entry, serving and refreshing");
                self.spawn_refresh(range.clone());
                let mut readout = self.readout(&entry, true, Some(age.as_secs()));
                readout.refreshing = true;
                return Ok(readout);
            }
        }

        match phase {
            FetchPhase::Listing => {
                let campaigns = self.source.fetch_listing().await?;
                let entry = Arc::new(CacheEntry {
                    key,
                    campaigns,
                    metrics_available: false,
                    fetched_at: Instant::now(),
                });
                self.entry.store(Some(Arc::clone(&entry)));
                // The single-flight flag may be held by another range's
                // refresh, in which case this entry will not converge
                // until it goes stale. The readout must say so.
                let spawned = self.spawn_refresh(range.clone());
                let mut readout = self.readout(&entry, false, None);
                readout.refreshing = spawned;
                Ok(readout)
            }
            FetchPhase::Metrics | FetchPhase::All => {
                let outcome = self.source.fetch_full(range).await?;
                let entry = Arc::new(CacheEntry {
                    key,
                    campaigns: outcome.campaigns,
                    metrics_available: outcome.metrics_available,
                    fetched_at: Instant::now(),
                });
                self.entry.store(Some(Arc::clone(&entry)));
                Ok(self.readout(&entry, false, None))
            }
        }
    }

    /// Starts a background full fetch unless one is already in flight.
    /// Returns whether this call actually started one.
    fn spawn_refresh(self: &Arc<Self>, range: DateRange) -> bool {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let key = range.cache_key();
            match cache.source.fetch_full(&range).await {
                Ok(outcome) => {
                    // A fetch for another range may have landed while this
                    // one ran; never clobber it with the old key's data.
                    let still_wanted = cache
                        .entry
                        .load()
                        .as_ref()
                        .is_some_and(|current| current.key == key);
                    if still_wanted {
                        debug!(key = %key, campaigns = outcome.campaigns.len(), "background refresh installed");
                        cache.entry.store(Some(Arc::new(CacheEntry {
                            key,
                            campaigns: outcome.campaigns,
                            metrics_available: outcome.metrics_available,
                            fetched_at: Instant::now(),
                        })));
                    }
                }
                Err(err) => {
                    // Stale entry stays; the next stale read retries.
                    warn!(key = %key, error = %err, "background refresh failed");
                }
            }
            cache.refreshing.store(false, Ordering::Release);
        });
        true
    }

    fn readout(&self, entry: &CacheEntry, cached: bool, cache_age: Option<u64>) -> CacheReadout {
        CacheReadout {
            source: DataSource::Live,
            cached,
            cache_age,
            metrics_available: entry.metrics_available,
            refreshing: self.refreshing.load(Ordering::Acquire),
            data: entry.campaigns.clone(),
        }
    }
}
