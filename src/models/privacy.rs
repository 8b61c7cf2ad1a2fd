// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Privacy mode applied to content imported from a provider.

use crate::error::IntegrationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Whether imported content keeps the provider's visibility or adopts the
/// user's local settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PrivacyMode {
    /// Keep the visibility set on the provider
    Original,
    /// Remap to the user's local visibility settings
    Settings,
}

impl PrivacyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyMode::Original => "original",
            PrivacyMode::Settings => "settings",
        }
    }
}

impl FromStr for PrivacyMode {
    type Err = IntegrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(PrivacyMode::Original),
            "settings" => Ok(PrivacyMode::Settings),
            other => Err(IntegrationError::InvalidPrivacy(other.to_string())),
        }
    }
}

impl fmt::Display for PrivacyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
