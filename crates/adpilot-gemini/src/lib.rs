// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini oracle client.
//!
//! Implements the [`adpilot_core::Oracle`] seam over the Generative
//! Language `generateContent` endpoint, with a sticky model-fallback
//! cursor: each rate-limit signal rotates to the next model in the
//! configured priority list, and the rotation persists across requests
//! for the lifetime of the process.

pub mod client;

pub use client::GeminiClient;
