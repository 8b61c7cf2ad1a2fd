// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch checking of integration records read from a file or stdin.

use super::inspect::{inspect, IntegrationReport};
use crate::error::Result;
use crate::models::{Integration, ValidationPolicy};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A source holds either one record or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Many(Vec<serde_json::Value>),
    One(serde_json::Value),
}

/// One output line, tied back to its input position.
#[derive(Debug, Clone, Serialize)]
pub struct CheckLine {
    pub source: String,
    /// Position of the record within its source
    pub index: usize,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CheckOutcome {
    Report(IntegrationReport),
    /// The record did not deserialize into an integration
    Malformed {
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<String>,
        valid: bool,
        problems: Vec<String>,
    },
}

impl CheckLine {
    pub fn is_valid(&self) -> bool {
        match &self.outcome {
            CheckOutcome::Report(report) => report.valid,
            CheckOutcome::Malformed { .. } => false,
        }
    }
}

/// Result of checking every record in one source.
#[derive(Debug, Clone)]
pub struct SourceCheck {
    pub lines: Vec<CheckLine>,
    /// Whether every record parsed and validated
    pub ok: bool,
}

/// Parse and inspect every record in `contents`.
///
/// A malformed record becomes a failed line and checking continues; only
/// contents that are not JSON at all are an error.
pub fn check_source(
    source: &str,
    contents: &str,
    policy: &ValidationPolicy,
    now: DateTime<Utc>,
    refresh_margin: Duration,
) -> Result<SourceCheck> {
    let records = match serde_json::from_str::<RecordFile>(contents)? {
        RecordFile::Many(records) => records,
        RecordFile::One(record) => vec![record],
    };

    let lines: Vec<CheckLine> = records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let user = value
                .get("user")
                .and_then(|u| u.as_str())
                .map(str::to_string);

            let outcome = match serde_json::from_value::<Integration>(value) {
                Ok(integration) => {
                    CheckOutcome::Report(inspect(&integration, policy, now, refresh_margin))
                }
                Err(e) => {
                    tracing::warn!(source, index, error = %e, "Malformed integration record");
                    CheckOutcome::Malformed {
                        user,
                        valid: false,
                        problems: vec![e.to_string()],
                    }
                }
            };

            CheckLine {
                source: source.to_string(),
                index,
                outcome,
            }
        })
        .collect();

    let ok = lines.iter().all(CheckLine::is_valid);
    Ok(SourceCheck { lines, ok })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn check(contents: &str) -> Result<SourceCheck> {
        check_source(
            "records.json",
            contents,
            &ValidationPolicy::default(),
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            Duration::seconds(300),
        )
    }

    #[test]
    fn test_single_record_source() {
        let result = check(r#"{"user":"u1"}"#).unwrap();
        assert!(result.ok);
        assert_eq!(result.lines.len(), 1);

        let line = serde_json::to_value(&result.lines[0]).unwrap();
        assert_eq!(line["source"], json!("records.json"));
        assert_eq!(line["index"], json!(0));
        assert_eq!(line["user"], json!("u1"));
        assert_eq!(line["valid"], json!(true));
    }

    #[test]
    fn test_malformed_record_does_not_stop_the_batch() {
        let contents = r#"[
            {"user":"u1"},
            {"user":"u2","komoot":{"active":true,"email":"a@b.co","password":"p",
             "completed":true,"planned":false,"privacy":"public"}},
            {"user":"u3","strava":null}
        ]"#;
        let result = check(contents).unwrap();

        assert!(!result.ok);
        assert_eq!(result.lines.len(), 3);
        assert!(result.lines[0].is_valid());
        assert!(!result.lines[1].is_valid());
        assert!(result.lines[2].is_valid());

        let bad = serde_json::to_value(&result.lines[1]).unwrap();
        assert_eq!(bad["index"], json!(1));
        assert_eq!(bad["user"], json!("u2"));
        assert_eq!(bad["valid"], json!(false));
        assert!(bad["problems"][0].as_str().unwrap().contains("public"));

        let last = serde_json::to_value(&result.lines[2]).unwrap();
        assert_eq!(last["index"], json!(2));
        assert_eq!(last["strava"]["state"], json!("disabled"));
    }

    #[test]
    fn test_invalid_record_fails_the_source() {
        let result = check(r#"{"user":"u1","komoot":{"active":true,"email":"nope",
            "password":"p","completed":true,"planned":true,"privacy":"settings"}}"#)
        .unwrap();
        assert!(!result.ok);
        assert!(matches!(result.lines[0].outcome, CheckOutcome::Report(_)));
    }

    #[test]
    fn test_non_json_source_is_an_error() {
        let err = check("{not json").unwrap_err();
        assert!(!err.is_shape_error());
    }
}
