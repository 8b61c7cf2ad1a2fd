// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava integration settings and OAuth token state.

use super::{redacted, PrivacyMode};
use crate::error::IntegrationError;
use crate::time_utils::epoch_to_utc;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Strava OAuth application client ID.
///
/// Upstream records carry this either as a JSON string or as a number.
/// Both are normalized to the textual form on input and always written
/// back out as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawClientId", into = "String")]
pub struct ClientId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawClientId {
    Text(String),
    Number(u64),
}

impl From<RawClientId> for ClientId {
    fn from(raw: RawClientId) -> Self {
        match raw {
            RawClientId::Text(s) => ClientId(s.trim().to_string()),
            RawClientId::Number(n) => ClientId(n.to_string()),
        }
    }
}

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of the ID, as Strava issues them.
    pub fn as_u64(&self) -> Result<u64, IntegrationError> {
        self.0
            .parse()
            .map_err(|_| IntegrationError::InvalidClientId(format!("{:?} is not numeric", self.0)))
    }
}

impl From<u64> for ClientId {
    fn from(n: u64) -> Self {
        ClientId(n.to_string())
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        ClientId(s.trim().to_string())
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        ClientId::from(s.as_str())
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_client_id(id: &ClientId) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new("empty_client_id"));
    }
    Ok(())
}

/// Unix seconds as written by upstream: an integer or a whole-number float.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEpochSecs {
    Int(i64),
    Float(f64),
}

fn deserialize_epoch_secs<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<RawEpochSecs>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawEpochSecs::Int(secs)) => Ok(Some(secs)),
        Some(RawEpochSecs::Float(secs))
            if secs.fract() == 0.0 && secs >= i64::MIN as f64 && secs < i64::MAX as f64 =>
        {
            Ok(Some(secs as i64))
        }
        Some(RawEpochSecs::Float(secs)) => Err(serde::de::Error::custom(format!(
            "expiresAt must be whole Unix seconds, got {secs}"
        ))),
    }
}

/// Strava integration settings for a user.
#[derive(Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StravaIntegration {
    /// Whether the integration is enabled
    pub active: bool,
    #[validate(custom(function = "validate_client_id"))]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | number"))]
    pub client_id: ClientId,
    /// OAuth application secret (absent until configured)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub client_secret: Option<String>,
    /// Import routes
    pub routes: bool,
    /// Import activities
    pub activities: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub refresh_token: Option<String>,
    /// Access token expiry (Unix seconds). Whole-number floats such as
    /// `1705320000.0` are accepted on input.
    #[serde(
        default,
        deserialize_with = "deserialize_epoch_secs",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "binding-generation", ts(optional, as = "Option<f64>"))]
    pub expires_at: Option<i64>,
    /// Only import activities after this point; unset means no lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub after: Option<String>,
    pub privacy: PrivacyMode,
}

impl fmt::Debug for StravaIntegration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StravaIntegration")
            .field("active", &self.active)
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("routes", &self.routes)
            .field("activities", &self.activities)
            .field("access_token", &redacted(&self.access_token))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("expires_at", &self.expires_at)
            .field("after", &self.after)
            .field("privacy", &self.privacy)
            .finish()
    }
}

/// The OAuth token triple, handled as one unit.
#[derive(Clone, PartialEq, Eq)]
pub struct StravaTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl StravaTokens {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.expires_at)
    }
}

impl fmt::Debug for StravaTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StravaTokens")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Authorization state derived from the token triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    /// No token field set
    Unauthorized,
    /// All three token fields set
    Authorized,
    /// Some but not all token fields set
    Partial,
}

impl StravaIntegration {
    /// Names of the token fields that are absent while another one is set.
    /// Empty when the triple is complete or entirely absent.
    pub fn missing_token_fields(&self) -> Vec<&'static str> {
        let present = [
            ("accessToken", self.access_token.is_some()),
            ("refreshToken", self.refresh_token.is_some()),
            ("expiresAt", self.expires_at.is_some()),
        ];
        if present.iter().all(|(_, p)| *p) || present.iter().all(|(_, p)| !*p) {
            return Vec::new();
        }
        present
            .iter()
            .filter(|(_, p)| !*p)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn token_state(&self) -> TokenState {
        match (&self.access_token, &self.refresh_token, self.expires_at) {
            (Some(_), Some(_), Some(_)) => TokenState::Authorized,
            (None, None, None) => TokenState::Unauthorized,
            _ => TokenState::Partial,
        }
    }

    /// The token triple, if all three parts are present.
    pub fn tokens(&self) -> Option<StravaTokens> {
        match (&self.access_token, &self.refresh_token, self.expires_at) {
            (Some(access), Some(refresh), Some(expires_at)) => Some(StravaTokens {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
                expires_at,
            }),
            _ => None,
        }
    }

    /// Replace the token triple, e.g. after authorization or a refresh.
    pub fn set_tokens(&mut self, tokens: StravaTokens) {
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.expires_at = Some(tokens.expires_at);
    }

    /// Drop the token triple, e.g. after deauthorization.
    pub fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.expires_at = None;
    }

    /// Whether the access token is expired or expires within `margin`.
    ///
    /// Returns false when the integration holds no complete token triple,
    /// since there is nothing to refresh.
    pub fn is_token_expired(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.tokens() {
            // A deadline past chrono's range is later than any expiry.
            Some(tokens) => now
                .checked_add_signed(margin)
                .is_none_or(|deadline| tokens.expires_at <= deadline.timestamp()),
            None => false,
        }
    }

    /// The `after` import cursor as a timestamp.
    ///
    /// Accepts RFC3339 dates and Unix seconds. Returns `None` when the
    /// cursor is unset or in neither format.
    pub fn after_timestamp(&self) -> Option<DateTime<Utc>> {
        let after = self.after.as_deref()?.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(after) {
            return Some(date.with_timezone(&Utc));
        }
        after.parse::<i64>().ok().and_then(epoch_to_utc)
    }
}
