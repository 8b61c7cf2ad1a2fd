// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user integration record (aggregate root).

use super::{KomootIntegration, StravaIntegration, TokenState};
use crate::error::{IntegrationError, Result};
use crate::models::strava::StravaTokens;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// A provider slot on an integration record.
///
/// The stored record distinguishes a missing field from an explicit `null`,
/// so the slot has three states rather than two.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSlot<T> {
    /// Field absent: the provider was never set up
    Unconfigured,
    /// Field is `null`: the provider was explicitly cleared
    Disabled,
    Configured(T),
}

impl<T> ProviderSlot<T> {
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, ProviderSlot::Unconfigured)
    }

    pub fn configured(&self) -> Option<&T> {
        match self {
            ProviderSlot::Configured(value) => Some(value),
            _ => None,
        }
    }

    pub fn configured_mut(&mut self) -> Option<&mut T> {
        match self {
            ProviderSlot::Configured(value) => Some(value),
            _ => None,
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            ProviderSlot::Unconfigured => "unconfigured",
            ProviderSlot::Disabled => "disabled",
            ProviderSlot::Configured(_) => "configured",
        }
    }
}

impl<T> Default for ProviderSlot<T> {
    fn default() -> Self {
        ProviderSlot::Unconfigured
    }
}

impl<T> From<Option<T>> for ProviderSlot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => ProviderSlot::Configured(value),
            None => ProviderSlot::Unconfigured,
        }
    }
}

// `Unconfigured` is skipped at the field level, so only `null` or a value
// ever reaches these impls.
impl<T: Serialize> Serialize for ProviderSlot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ProviderSlot::Configured(value) => serializer.serialize_some(value),
            ProviderSlot::Unconfigured | ProviderSlot::Disabled => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ProviderSlot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => ProviderSlot::Configured(value),
            None => ProviderSlot::Disabled,
        })
    }
}

/// A third-party provider that can be linked to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Strava,
    Komoot,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Strava => f.write_str("strava"),
            Provider::Komoot => f.write_str("komoot"),
        }
    }
}

/// Rules applied by [`Integration::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject a Strava config holding only part of the token triple.
    /// When false the inconsistency is only logged.
    pub strict_tokens: bool,
}

/// A user's third-party integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IntegrationRecord")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Integration {
    /// Assigned by the storage layer
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub id: Option<String>,
    /// Owning user ID
    pub user: String,
    #[serde(skip_serializing_if = "ProviderSlot::is_unconfigured")]
    #[cfg_attr(
        feature = "binding-generation",
        ts(as = "Option<StravaIntegration>", optional = nullable)
    )]
    pub strava: ProviderSlot<StravaIntegration>,
    #[serde(skip_serializing_if = "ProviderSlot::is_unconfigured")]
    #[cfg_attr(
        feature = "binding-generation",
        ts(as = "Option<KomootIntegration>", optional = nullable)
    )]
    pub komoot: ProviderSlot<KomootIntegration>,
}

/// Wire form of [`Integration`], checked before it becomes one.
#[derive(Deserialize)]
struct IntegrationRecord {
    #[serde(default)]
    id: Option<String>,
    user: String,
    #[serde(default)]
    strava: ProviderSlot<StravaIntegration>,
    #[serde(default)]
    komoot: ProviderSlot<KomootIntegration>,
}

impl TryFrom<IntegrationRecord> for Integration {
    type Error = IntegrationError;

    fn try_from(record: IntegrationRecord) -> Result<Self> {
        ensure_user(&record.user)?;
        Ok(Self {
            id: record.id,
            user: record.user,
            strava: record.strava,
            komoot: record.komoot,
        })
    }
}

fn ensure_user(user: &str) -> Result<()> {
    if user.trim().is_empty() {
        return Err(IntegrationError::EmptyUser);
    }
    Ok(())
}

impl Integration {
    /// Create an unsaved integration record for `user`.
    ///
    /// Providers passed as `None` are left unconfigured.
    pub fn new(
        user: impl Into<String>,
        strava: Option<StravaIntegration>,
        komoot: Option<KomootIntegration>,
    ) -> Result<Self> {
        let user = user.into();
        ensure_user(&user)?;

        tracing::debug!(
            user = %user,
            strava = strava.is_some(),
            komoot = komoot.is_some(),
            "Created integration record"
        );

        Ok(Self {
            id: None,
            user,
            strava: strava.into(),
            komoot: komoot.into(),
        })
    }

    /// Stamp the ID assigned by the storage layer.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn strava(&self) -> Option<&StravaIntegration> {
        self.strava.configured()
    }

    pub fn komoot(&self) -> Option<&KomootIntegration> {
        self.komoot.configured()
    }

    /// Providers with a configuration present, active or not.
    pub fn configured_providers(&self) -> Vec<Provider> {
        let mut providers = Vec::new();
        if self.strava.configured().is_some() {
            providers.push(Provider::Strava);
        }
        if self.komoot.configured().is_some() {
            providers.push(Provider::Komoot);
        }
        providers
    }

    /// Providers configured and switched on.
    pub fn active_providers(&self) -> Vec<Provider> {
        let mut providers = Vec::new();
        if self.strava().is_some_and(|s| s.active) {
            providers.push(Provider::Strava);
        }
        if self.komoot().is_some_and(|k| k.active) {
            providers.push(Provider::Komoot);
        }
        providers
    }

    /// Store a new token triple on the Strava config.
    ///
    /// Returns false when Strava is not configured.
    pub fn update_strava_tokens(&mut self, tokens: StravaTokens) -> bool {
        match self.strava.configured_mut() {
            Some(strava) => {
                strava.set_tokens(tokens);
                tracing::debug!(user = %self.user, "Updated Strava tokens");
                true
            }
            None => false,
        }
    }

    /// Check field contents and token consistency.
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<()> {
        ensure_user(&self.user)?;

        if let Some(strava) = self.strava() {
            strava.validate().inspect_err(|e| {
                tracing::warn!(user = %self.user, error = %e, "Invalid Strava integration");
            })?;

            if strava.token_state() == TokenState::Partial {
                let missing = strava.missing_token_fields();
                if policy.strict_tokens {
                    return Err(IntegrationError::PartialTokens { missing });
                }
                tracing::warn!(
                    user = %self.user,
                    missing = ?missing,
                    "Strava token triple is incomplete"
                );
            }
        }

        if let Some(komoot) = self.komoot() {
            komoot.validate().inspect_err(|e| {
                tracing::warn!(user = %self.user, error = %e, "Invalid Komoot integration");
            })?;
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
