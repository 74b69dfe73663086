//! Plugin output rendering.
//!
//! The output shape is consumed by the monitoring scheduler and must stay
//! stable:
//!
//! ```text
//! <LEVEL>: <summary> | <metric tokens>
//! [unknown lines]
//! [critical lines]
//! [warning lines]
//! [normal lines]
//! ```

use std::fmt;

use probe_types::Severity;
use serde::Serialize;

use crate::data::Evaluation;

/// Rendered plugin output and the exit code to leave with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub exit_code: u8,
    pub text: String,
}

impl Report {
    /// Render an evaluation.
    pub fn render(evaluation: &Evaluation) -> Self {
        let metrics = evaluation
            .metrics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        let mut lines = vec![format!(
            "{}: {} | {}",
            evaluation.severity.label(),
            evaluation.summary,
            metrics
        )];
        lines.extend(evaluation.detail_lines().map(str::to_string));

        Self {
            severity: evaluation.severity,
            exit_code: evaluation.severity.exit_code(),
            text: lines.join("\n"),
        }
    }

    /// Report for a check that could not be evaluated at all.
    pub fn unknown(message: impl fmt::Display) -> Self {
        Self {
            severity: Severity::Unknown,
            exit_code: Severity::Unknown.exit_code(),
            text: format!("UNKNOWN: {}", message),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Machine-readable form of a finished check, written by `--export`.
#[derive(Debug, Serialize)]
pub struct Export<'a> {
    pub check: String,
    pub status: Severity,
    pub exit_code: u8,
    pub summary: &'a str,
    pub metrics: Vec<String>,
    pub details: Details<'a>,
}

/// Report lines per output bucket.
#[derive(Debug, Serialize)]
pub struct Details<'a> {
    pub unknown: &'a [String],
    pub critical: &'a [String],
    pub warning: &'a [String],
    pub normal: &'a [String],
}

impl<'a> Export<'a> {
    pub fn new(check: impl fmt::Display, evaluation: &'a Evaluation) -> Self {
        Self {
            check: check.to_string(),
            status: evaluation.severity,
            exit_code: evaluation.severity.exit_code(),
            summary: &evaluation.summary,
            metrics: evaluation.metrics.iter().map(ToString::to_string).collect(),
            details: Details {
                unknown: &evaluation.unknown,
                critical: &evaluation.critical,
                warning: &evaluation.warning,
                normal: &evaluation.normal,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
