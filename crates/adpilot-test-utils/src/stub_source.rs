// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-counting campaign source stub for cache tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use adpilot_core::{AdpilotError, Campaign, CampaignSource, DateRange, FetchOutcome};

/// A campaign source serving a fixed campaign set while counting calls.
///
/// `fail_next_full` makes the next full fetch return an upstream error,
/// for exercising the cache's failure paths.
pub struct StubCampaignSource {
    campaigns: Vec<Campaign>,
    listing_calls: AtomicUsize,
    full_calls: AtomicUsize,
    fail_next_full: AtomicBool,
}

impl StubCampaignSource {
    pub fn new(campaigns: Vec<Campaign>) -> Arc<Self> {
        Arc::new(Self {
            campaigns,
            listing_calls: AtomicUsize::new(0),
            full_calls: AtomicUsize::new(0),
            fail_next_full: AtomicBool::new(false),
        })
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn full_calls(&self) -> usize {
        self.full_calls.load(Ordering::SeqCst)
    }

    /// Arms a one-shot failure for the next full fetch.
    pub fn fail_next_full(&self) {
        self.fail_next_full.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CampaignSource for StubCampaignSource {
    async fn fetch_listing(&self) -> Result<Vec<Campaign>, AdpilotError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        let mut campaigns = self.campaigns.clone();
        for campaign in &mut campaigns {
            campaign.current = Default::default();
            campaign.previous = None;
        }
        Ok(campaigns)
    }

    async fn fetch_full(&self, _range: &DateRange) -> Result<FetchOutcome, AdpilotError> {
        self.full_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_full.swap(false, Ordering::SeqCst) {
            return Err(AdpilotError::Upstream {
                status: 500,
                body: "stubbed failure".into(),
            });
        }
        Ok(FetchOutcome {
            campaigns: self.campaigns.clone(),
            metrics_available: true,
        })
    }
}
