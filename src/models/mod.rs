// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for integration records.

pub mod integration;
pub mod komoot;
pub mod privacy;
pub mod strava;

pub use integration::{Integration, Provider, ProviderSlot, ValidationPolicy};
pub use komoot::KomootIntegration;
pub use privacy::PrivacyMode;
pub use strava::{ClientId, StravaIntegration, StravaTokens, TokenState};

/// Debug placeholder for secrets that may or may not be set.
pub(crate) fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "[redacted]")
}
