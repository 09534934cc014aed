// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-slot campaign cache.
//!
//! Holds at most one derived-campaign snapshot, keyed by the date range
//! that produced it. Reads against a fresh entry return immediately;
//! reads against a stale entry still return immediately but kick off at
//! most one background refresh. A cold start can opt into a two-phase
//! fill: a fast listing-only snapshot first, converging to full metrics
//! once the upstream report completes.
//!
//! The upstream report protocol can take minutes; the cache exists so
//! that no read blocks on that once any snapshot is available.

pub mod cache;

pub use cache::{CacheReadout, CampaignCache};
