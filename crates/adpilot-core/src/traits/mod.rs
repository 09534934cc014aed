// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits forming the seams of the pipeline.
//!
//! `CampaignSource` sits between the cache and the upstream client;
//! `Oracle` sits between the advisor and the model provider. Both have
//! deterministic test doubles in `adpilot-test-utils`.

pub mod oracle;
pub mod source;

pub use oracle::Oracle;
pub use source::{CampaignSource, FetchOutcome};
