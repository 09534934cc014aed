// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API gateway for the Adpilot backend.
//!
//! Exposes the campaign cache, the feedback log, and the two
//! recommendation request types as a small JSON API. Sellers without live
//! credentials get a fixed demo dataset instead of errors, so the whole
//! surface stays explorable before any Amazon Ads onboarding.

pub mod demo;
pub mod handlers;
pub mod server;

pub use server::{AppState, build_router, start_server};
