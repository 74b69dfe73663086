//! Performance metric tokens.

use alloc::string::String;
use core::fmt;

/// Threshold and bound fields of a metric token.
///
/// Every field is optional; absent fields render as empty slots so the
/// positional format stays intact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricRange {
    pub warning: Option<String>,
    pub critical: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl MetricRange {
    /// A range with every slot left empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A range carrying warning and critical thresholds.
    pub fn thresholds(warning: impl Into<String>, critical: impl Into<String>) -> Self {
        Self {
            warning: Some(warning.into()),
            critical: Some(critical.into()),
            ..Default::default()
        }
    }
}

/// One `'label'=value[;warn;crit;min;max]` token.
///
/// # Example
///
/// ```rust
/// use probe_types::{Metric, MetricRange};
///
/// let usage = Metric::new("/log_used", "42%");
/// assert_eq!(usage.to_string(), "'/log_used'=42%");
///
/// let reading = Metric::new("CPU1", "38").with_range(MetricRange::empty());
/// assert_eq!(reading.to_string(), "'CPU1'=38;;;;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub range: Option<MetricRange>,
}

impl Metric {
    /// A bare `'label'=value` token.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            range: None,
        }
    }

    /// Attach threshold/bound slots.
    pub fn with_range(mut self, range: MetricRange) -> Self {
        self.range = Some(range);
        self
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'={}", self.label, self.value)?;
        if let Some(range) = &self.range {
            let slot = |v: &Option<String>| v.clone().unwrap_or_default();
            write!(
                f,
                ";{};{};{};{}",
                slot(&range.warning),
                slot(&range.critical),
                slot(&range.min),
                slot(&range.max)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_bare_token() {
        assert_eq!(Metric::new("data_used", "1.2TB").to_string(), "'data_used'=1.2TB");
    }

    #[test]
    fn test_token_with_thresholds() {
        let metric = Metric::new("epoch-delta", "12.5").with_range(MetricRange::thresholds("60", "300"));
        assert_eq!(metric.to_string(), "'epoch-delta'=12.5;60;300;;");
    }

    #[test]
    fn test_token_with_empty_range() {
        let metric = Metric::new("Ambient", "24").with_range(MetricRange::empty());
        assert_eq!(metric.to_string(), "'Ambient'=24;;;;");
    }
}
