// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runtime configuration loaded from environment variables.

use crate::models::ValidationPolicy;
use chrono::Duration;
use std::env;
use std::str::FromStr;

/// Largest accepted token refresh margin (one year).
pub const MAX_REFRESH_MARGIN_SECS: i64 = 366 * 24 * 60 * 60;

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON lines
    Json,
    /// Human-readable
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(()),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Treat an incomplete Strava token triple as a validation error
    pub strict_tokens: bool,
    /// Tokens expiring within this many seconds count as expired
    pub token_refresh_margin_secs: i64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_tokens: false,
            token_refresh_margin_secs: 300,
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults; set but malformed ones
    /// are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            strict_tokens: parse_var("INTEGRATION_STRICT_TOKENS", parse_bool)?
                .unwrap_or(defaults.strict_tokens),
            token_refresh_margin_secs: parse_var("TOKEN_REFRESH_MARGIN_SECS", |v| {
                v.trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|secs| (0..=MAX_REFRESH_MARGIN_SECS).contains(secs))
            })?
            .unwrap_or(defaults.token_refresh_margin_secs),
            log_format: parse_var("LOG_FORMAT", |v| v.parse().ok())?
                .unwrap_or(defaults.log_format),
        })
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            strict_tokens: self.strict_tokens,
        }
    }

    pub fn token_refresh_margin(&self) -> Duration {
        Duration::seconds(
            self.token_refresh_margin_secs.clamp(0, MAX_REFRESH_MARGIN_SECS),
        )
    }
}

fn parse_var<T>(
    name: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse(&value)
            .map(Some)
            .ok_or(ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
