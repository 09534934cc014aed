// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seller feedback log.
//!
//! Records what the seller did with each recommendation (approve, deny,
//! modify) in a bounded JSON file, and digests the recent window into the
//! calibration context that precedes every new recommendation request.
//! The store prepares the factual digest only; any biasing happens in the
//! oracle's reasoning.

pub mod store;
pub mod summary;

pub use store::{FeedbackAction, FeedbackEntry, FeedbackStore};
pub use summary::FeedbackSummary;
