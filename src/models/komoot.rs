// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Komoot integration settings.

use super::PrivacyMode;
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Komoot integration settings for a user.
///
/// Komoot has no token flow; the account credentials are stored directly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct KomootIntegration {
    pub active: bool,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Import completed tours
    pub completed: bool,
    /// Import planned tours
    pub planned: bool,
    pub privacy: PrivacyMode,
}

impl fmt::Debug for KomootIntegration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KomootIntegration")
            .field("active", &self.active)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("completed", &self.completed)
            .field("planned", &self.planned)
            .field("privacy", &self.privacy)
            .finish()
    }
}
