// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration record checker
//!
//! Reads integration records as JSON (files given on the command line, or
//! stdin), validates them and prints one JSON report line per record.

use anyhow::Context;
use integration_records::{
    config::{Config, LogFormat},
    services::check_source,
};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Integration check aborted");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every record parsed and validated.
fn run() -> anyhow::Result<bool> {
    let config = Config::from_env();
    init_logging(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or(LogFormat::Json),
    );
    let config = config.context("Failed to load configuration")?;

    let policy = config.validation_policy();
    tracing::info!(
        strict_tokens = policy.strict_tokens,
        refresh_margin_secs = config.token_refresh_margin_secs,
        "Starting integration check"
    );

    let paths: Vec<String> = std::env::args().skip(1).collect();
    let sources = if paths.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        vec![("<stdin>".to_string(), input)]
    } else {
        paths
            .into_iter()
            .map(|path| {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {path}"))?;
                Ok((path, contents))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let now = chrono::Utc::now();
    let mut stdout = io::stdout().lock();
    let mut all_ok = true;
    let mut checked = 0usize;

    for (source, contents) in sources {
        let result = check_source(
            &source,
            &contents,
            &policy,
            now,
            config.token_refresh_margin(),
        )
        .with_context(|| format!("{source} is not valid JSON"))?;

        all_ok &= result.ok;
        checked += result.lines.len();
        for line in &result.lines {
            writeln!(stdout, "{}", serde_json::to_string(line)?)?;
        }
    }

    tracing::info!(checked, ok = all_ok, "Integration check finished");
    Ok(all_ok)
}

/// Initialize logging on stderr; stdout carries the reports.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("integration_records=debug,integration_check=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}
