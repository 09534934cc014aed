// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Adpilot.
//!
//! Layered TOML + environment configuration built on Figment, with
//! `deny_unknown_fields` models so a typo in a config key fails at startup
//! instead of silently defaulting.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AdpilotConfig, AmazonConfig, CacheConfig, FeedbackConfig, GatewayConfig, GeminiConfig,
    ServiceConfig,
};
