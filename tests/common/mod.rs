// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use integration_records::models::{ClientId, KomootIntegration, PrivacyMode, StravaIntegration};
use std::fs;
use std::path::Path;

/// Read a JSON fixture from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = Path::new("tests/fixtures").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// An unauthorized Strava config.
#[allow(dead_code)]
pub fn strava(client_id: impl Into<ClientId>) -> StravaIntegration {
    StravaIntegration {
        active: true,
        client_id: client_id.into(),
        client_secret: Some("app-secret".to_string()),
        routes: true,
        activities: true,
        access_token: None,
        refresh_token: None,
        expires_at: None,
        after: None,
        privacy: PrivacyMode::Original,
    }
}

/// A Komoot config with valid credentials.
#[allow(dead_code)]
pub fn komoot(privacy: PrivacyMode) -> KomootIntegration {
    KomootIntegration {
        active: true,
        email: "rider@example.com".to_string(),
        password: "hunter2".to_string(),
        completed: true,
        planned: false,
        privacy,
    }
}
