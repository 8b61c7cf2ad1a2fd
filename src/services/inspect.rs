// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only inspection of integration records.
//!
//! Produces a report per record describing:
//! - Which provider slots are configured, cleared or unset
//! - Strava authorization state and token expiry
//! - Validation problems under the given policy

use crate::models::{
    Integration, PrivacyMode, Provider, ProviderSlot, TokenState, ValidationPolicy,
};
use crate::time_utils::{epoch_to_utc, format_utc_rfc3339};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Summary of one integration record.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user: String,
    /// Whether the record passed validation under the policy
    pub valid: bool,
    /// Providers configured and switched on
    pub active_providers: Vec<Provider>,
    pub strava: ProviderReport,
    pub komoot: ProviderReport,
    /// Validation errors and data-quality warnings
    pub problems: Vec<String>,
}

/// Summary of one provider slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderReport {
    /// "unconfigured", "disabled" or "configured"
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacyMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_state: Option<TokenState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expired: Option<bool>,
    /// Token expiry (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Import lower bound (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_after: Option<String>,
}

/// Inspect a record as of `now`.
///
/// Tokens expiring within `refresh_margin` are reported as expired.
pub fn inspect(
    integration: &Integration,
    policy: &ValidationPolicy,
    now: DateTime<Utc>,
    refresh_margin: Duration,
) -> IntegrationReport {
    let mut problems = Vec::new();

    let valid = match integration.validate(policy) {
        Ok(()) => true,
        Err(e) => {
            problems.push(e.to_string());
            false
        }
    };

    let strava = match &integration.strava {
        ProviderSlot::Configured(strava) => {
            let token_state = strava.token_state();
            if token_state == TokenState::Partial && !policy.strict_tokens {
                problems.push(format!(
                    "Strava tokens incomplete, missing: {}",
                    strava.missing_token_fields().join(", ")
                ));
            }
            if strava.after.is_some() && strava.after_timestamp().is_none() {
                problems.push("Strava import cursor is not a timestamp".to_string());
            }

            let tokens = strava.tokens();
            ProviderReport {
                state: integration.strava.state_name(),
                active: Some(strava.active),
                privacy: Some(strava.privacy),
                token_state: Some(token_state),
                token_expired: tokens
                    .as_ref()
                    .map(|_| strava.is_token_expired(now, refresh_margin)),
                expires_at: tokens
                    .and_then(|t| epoch_to_utc(t.expires_at))
                    .map(format_utc_rfc3339),
                import_after: strava.after_timestamp().map(format_utc_rfc3339),
            }
        }
        slot => ProviderReport {
            state: slot.state_name(),
            ..Default::default()
        },
    };

    let komoot = match &integration.komoot {
        ProviderSlot::Configured(komoot) => ProviderReport {
            state: integration.komoot.state_name(),
            active: Some(komoot.active),
            privacy: Some(komoot.privacy),
            ..Default::default()
        },
        slot => ProviderReport {
            state: slot.state_name(),
            ..Default::default()
        },
    };

    if !valid {
        tracing::info!(user = %integration.user, "Integration failed validation");
    }

    IntegrationReport {
        id: integration.id.clone(),
        user: integration.user.clone(),
        valid,
        active_providers: integration.active_providers(),
        strava,
        komoot,
        problems,
    }
}
