// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for integration records.

/// Errors raised when building, parsing or validating an integration record.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("Integration must belong to a user")]
    EmptyUser,

    #[error("Invalid privacy mode: {0:?} (expected \"original\" or \"settings\")")]
    InvalidPrivacy(String),

    #[error("Invalid Strava client ID: {0}")]
    InvalidClientId(String),

    #[error("Strava tokens incomplete, missing: {}", missing.join(", "))]
    PartialTokens { missing: Vec<&'static str> },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntegrationError {
    /// Whether this error came from the record's shape rather than from I/O
    /// or a policy check.
    pub fn is_shape_error(&self) -> bool {
        match self {
            IntegrationError::EmptyUser
            | IntegrationError::InvalidPrivacy(_)
            | IntegrationError::InvalidClientId(_) => true,
            IntegrationError::Serialization(e) => e.is_data(),
            IntegrationError::PartialTokens { .. } | IntegrationError::Validation(_) => false,
        }
    }
}

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, IntegrationError>;
