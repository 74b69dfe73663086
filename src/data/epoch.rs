//! Clock skew between the appliance report and the monitoring host.

use std::time::{SystemTime, UNIX_EPOCH};

use probe_types::{Metric, MetricRange, Severity, Snapshot};

use super::evaluation::{Bucket, Evaluation};
use crate::error::{ProbeError, Result};

/// Allowed skew, in seconds, either side of the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochThresholds {
    pub warning: i64,
    pub critical: i64,
}

impl EpochThresholds {
    pub fn new(warning: i64, critical: i64) -> Self {
        Self { warning, critical }
    }
}

/// Current time in (fractional) seconds since the Unix epoch.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Compare a report timestamp against `now`.
///
/// The report is acceptable while its timestamp lies strictly inside
/// `(now - slack, now + slack)`; the critical window is checked first. A
/// timestamp in the future yields a negative delta and is judged the same
/// way.
pub fn evaluate_epoch(epoch: i64, now: f64, thresholds: &EpochThresholds) -> Evaluation {
    let mut evaluation = Evaluation::new();
    let reported = epoch as f64;
    let delta = now - reported;
    let age = delta.trunc() as i64;

    evaluation.push_metric(Metric::new("epoch-delta", delta.to_string()).with_range(
        MetricRange::thresholds(thresholds.warning.to_string(), thresholds.critical.to_string()),
    ));

    let within = |slack: i64| {
        let slack = slack as f64;
        now - slack < reported && reported < now + slack
    };

    if !within(thresholds.critical) {
        evaluation.push(Bucket::Critical, format!("Really old data, it is '{}'s old", age));
        evaluation.escalate(Severity::Critical);
        evaluation.summary = format!(
            "Epoch delta is outside the critical slack of '{}' seconds, it is currently '{}' seconds",
            thresholds.critical, age
        );
    } else if !within(thresholds.warning) {
        evaluation.push(Bucket::Warning, format!("Old data, it is '{}'s old", age));
        evaluation.escalate(Severity::Warning);
        evaluation.summary = format!(
            "Epoch delta is outside the warning slack of '{}' seconds, it is currently '{}' seconds",
            thresholds.warning, age
        );
    } else {
        evaluation.summary = format!(
            "Epoch delta is within the specified slack, it is currently '{}' seconds",
            age
        );
    }

    evaluation
}

/// Run the epoch check against a snapshot.
pub fn check_epoch(snapshot: &Snapshot, now: f64, thresholds: &EpochThresholds) -> Result<Evaluation> {
    let raw = snapshot.epoch.as_deref().unwrap_or_default();
    let epoch: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ProbeError::InvalidEpoch(raw.to_string()))?;
    Ok(evaluate_epoch(epoch, now, thresholds))
}
