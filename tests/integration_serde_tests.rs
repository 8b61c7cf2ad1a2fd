// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serialization boundary tests for integration records.

use integration_records::models::{
    ClientId, Integration, KomootIntegration, PrivacyMode, ProviderSlot, StravaTokens, TokenState,
};
use serde_json::json;

mod common;

#[test]
fn test_full_fixture_round_trip() {
    let json = common::fixture("integration_full.json");
    let integration = Integration::from_json(&json).expect("Failed to parse fixture");

    assert_eq!(integration.id.as_deref(), Some("b6f2c1d0"));
    assert_eq!(integration.user, "user-42");

    let strava = integration.strava().expect("Strava should be configured");
    assert_eq!(strava.client_id.as_str(), "12345");
    assert_eq!(strava.token_state(), TokenState::Authorized);
    assert_eq!(strava.privacy, PrivacyMode::Original);

    let komoot = integration.komoot().expect("Komoot should be configured");
    assert_eq!(komoot.privacy, PrivacyMode::Settings);

    let reparsed = Integration::from_json(&integration.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, integration);
}

#[test]
fn test_client_id_written_back_as_string() {
    let json = common::fixture("integration_full.json");
    let value = Integration::from_json(&json)
        .unwrap()
        .to_json_value()
        .unwrap();
    assert_eq!(value["strava"]["clientId"], json!("12345"));
}

#[test]
fn test_numeric_and_string_client_ids_are_equivalent() {
    let numeric = json!({
        "user": "u1",
        "strava": {
            "active": true, "clientId": 12345, "routes": true,
            "activities": true, "privacy": "original"
        }
    });
    let mut textual = numeric.clone();
    textual["strava"]["clientId"] = json!("12345");

    let a: Integration = serde_json::from_value(numeric).unwrap();
    let b: Integration = serde_json::from_value(textual).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.strava().unwrap().client_id, ClientId::from(12345));
}

#[test]
fn test_komoot_round_trips_unchanged() {
    let komoot = KomootIntegration {
        active: true,
        email: "rider@example.com".to_string(),
        password: "hunter2".to_string(),
        completed: true,
        planned: false,
        privacy: PrivacyMode::Settings,
    };
    let integration = Integration::new("user-7", None, Some(komoot.clone())).unwrap();

    let value = integration.to_json_value().unwrap();
    assert_eq!(
        value,
        json!({
            "user": "user-7",
            "komoot": {
                "active": true,
                "email": "rider@example.com",
                "password": "hunter2",
                "completed": true,
                "planned": false,
                "privacy": "settings"
            }
        })
    );

    let reparsed: Integration = serde_json::from_value(value).unwrap();
    assert_eq!(reparsed.komoot(), Some(&komoot));
}

#[test]
fn test_optional_strava_fields_stay_absent() {
    let integration = Integration::new("u1", Some(common::strava("42")), None).unwrap();
    let value = integration.to_json_value().unwrap();
    let strava = value["strava"].as_object().unwrap();

    for field in ["accessToken", "refreshToken", "expiresAt", "after"] {
        assert!(!strava.contains_key(field), "{field} should be omitted");
    }
    assert_eq!(strava["routes"], json!(true));
}

#[test]
fn test_token_update_round_trips() {
    let mut integration = Integration::new("u1", Some(common::strava(7u64)), None).unwrap();
    assert!(integration.update_strava_tokens(StravaTokens {
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
        expires_at: 1_705_320_000,
    }));

    let reparsed = Integration::from_json(&integration.to_json().unwrap()).unwrap();
    assert_eq!(
        reparsed.strava().unwrap().tokens().unwrap().expires_at,
        1_705_320_000
    );
}

#[test]
fn test_batch_fixture_slot_states() {
    let records: Vec<Integration> =
        serde_json::from_str(&common::fixture("integration_batch.json")).unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].strava, ProviderSlot::Unconfigured);
    assert_eq!(records[1].strava, ProviderSlot::Disabled);
    assert_eq!(records[1].komoot, ProviderSlot::Disabled);
    assert!(records[1].configured_providers().is_empty());

    let strava = records[2].strava().unwrap();
    assert!(!strava.active);
    assert!(strava.client_secret.is_none());
    assert_eq!(strava.token_state(), TokenState::Unauthorized);
    assert!(records[2].active_providers().is_empty());

    let rewritten = serde_json::to_value(&records).unwrap();
    assert_eq!(rewritten[0], json!({ "user": "user-1" }));
    assert_eq!(
        rewritten[1],
        json!({ "user": "user-2", "strava": null, "komoot": null })
    );
}

#[test]
fn test_unknown_privacy_is_rejected() {
    let value = json!({
        "user": "u1",
        "komoot": {
            "active": true, "email": "a@b.co", "password": "p",
            "completed": false, "planned": true, "privacy": "public"
        }
    });
    let err = Integration::from_json(&value.to_string()).unwrap_err();
    assert!(err.is_shape_error());
    assert!(err.to_string().contains("public"));
}

#[test]
fn test_missing_required_fields_are_rejected() {
    assert!(Integration::from_json(r#"{"strava":null}"#).is_err());
    assert!(Integration::from_json(
        r#"{"user":"u1","strava":{"active":true,"clientId":"1","routes":true,"activities":true}}"#
    )
    .is_err());
    assert!(Integration::from_json(
        r#"{"user":"u1","strava":{"active":true,"routes":true,"activities":true,"privacy":"original"}}"#
    )
    .is_err());
}
