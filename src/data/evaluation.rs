//! The result of evaluating one check.

use probe_types::{Metric, Severity};
use serde::Serialize;

/// Output channel a report line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Unknown,
    Critical,
    Warning,
    Normal,
}

/// Everything a check found, ready for rendering.
///
/// Built incrementally while records are classified and consumed once by
/// the report renderer. Lines keep the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Evaluation {
    pub severity: Severity,
    pub summary: String,
    pub metrics: Vec<Metric>,
    pub unknown: Vec<String>,
    pub critical: Vec<String>,
    pub warning: Vec<String>,
    pub normal: Vec<String>,
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a report line to a bucket.
    pub fn push(&mut self, bucket: Bucket, line: impl Into<String>) {
        let line = line.into();
        match bucket {
            Bucket::Unknown => self.unknown.push(line),
            Bucket::Critical => self.critical.push(line),
            Bucket::Warning => self.warning.push(line),
            Bucket::Normal => self.normal.push(line),
        }
    }

    pub fn push_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Raise the overall severity; it never drops back.
    pub fn escalate(&mut self, severity: Severity) {
        self.severity = self.severity.escalate(severity);
    }

    /// Lines in rendering order: unknown, critical, warning, normal.
    pub fn detail_lines(&self) -> impl Iterator<Item = &str> {
        self.unknown
            .iter()
            .chain(&self.critical)
            .chain(&self.warning)
            .chain(&self.normal)
            .map(String::as_str)
    }
}
