// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Amazon Ads API upstream client for Adpilot.
//!
//! Covers LwA token exchange with caching, paginated SP v3 listing
//! retrieval, the async report protocol (submit, poll, download,
//! decompress), and the [`AmazonCampaignSource`] that merges everything
//! into derived campaigns for the cache.

pub mod client;
pub mod report;
pub mod source;
pub mod types;

pub use client::AdsClient;
pub use source::AmazonCampaignSource;
pub use types::{AdsProfile, ProductAd};
