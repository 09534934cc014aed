// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config loading and defaulting.

use adpilot_config::{AdpilotConfig, load_config_from_str};

#[test]
fn empty_config_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.cache.ttl_secs, 300);
    assert_eq!(config.feedback.max_entries, 200);
    assert_eq!(config.feedback.summary_window, 50);
    assert_eq!(config.gateway.port, 8480);
    assert_eq!(config.gemini.model_priority.len(), 3);
    assert_eq!(config.gemini.model_priority[0], "gemini-1.5-flash");
    assert!(!config.amazon.is_configured());
    assert!(!config.gemini.is_configured());
}

#[test]
fn amazon_section_parses_and_reports_configured() {
    let config = load_config_from_str(
        r#"
        [amazon]
        client_id = "amzn1.application-oa2-client.abc"
        client_secret = "secret"
        refresh_token = "Atzr|refresh"
        profile_id = "12345"
        "#,
    )
    .unwrap();
    assert!(config.amazon.is_configured());
    assert!(config.amazon.require_configured().is_ok());
    // Endpoint defaults survive partial section overrides.
    assert_eq!(config.amazon.api_base, "https://advertising-api.amazon.com");
    assert_eq!(config.amazon.token_url, "https://api.amazon.com/auth/o2/token");
}

#[test]
fn partial_credentials_are_not_configured() {
    let config = load_config_from_str(
        r#"
        [amazon]
        client_id = "amzn1.application-oa2-client.abc"
        client_secret = "secret"
        "#,
    )
    .unwrap();
    assert!(!config.amazon.is_configured());
    let err = config.amazon.require_configured().unwrap_err();
    assert!(err.is_not_configured());
}

#[test]
fn unknown_keys_are_rejected() {
    let result = load_config_from_str(
        r#"
        [cache]
        ttl_seconds = 60
        "#,
    );
    assert!(result.is_err(), "typo'd key must not silently default");
}

#[test]
fn gemini_model_priority_override() {
    let config = load_config_from_str(
        r#"
        [gemini]
        api_key = "key"
        model_priority = ["gemini-1.5-flash", "gemini-pro"]
        "#,
    )
    .unwrap();
    assert!(config.gemini.is_configured());
    assert_eq!(config.gemini.model_priority.len(), 2);
    assert_eq!(config.gemini.temperature, 0.3);
}

#[test]
fn config_round_trips_through_serde() {
    let config = AdpilotConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: AdpilotConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.cache.ttl_secs, config.cache.ttl_secs);
    assert_eq!(back.feedback.path, config.feedback.path);
}
