//! Health classification of component records.
//!
//! Every component type is judged by the same rule: a record is healthy when
//! its `State` is `OK` and its `ErrorStatus` is zero, degraded when either
//! says otherwise, and indeterminate when the fields needed to decide are
//! missing or unreadable. Indeterminate records do not stop the check; they
//! are reported and the overall result becomes `UNKNOWN`.

use probe_types::{Scope, Severity, Snapshot};
use tracing::{debug, warn};

use super::evaluation::{Bucket, Evaluation};
use super::kind::ComponentKind;
use super::project::{project_groups, ProjectedRecord};
use super::select::select;
use crate::error::{ProbeError, Result};

/// Health of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Healthy,
    Degraded,
    Indeterminate,
}

impl Condition {
    pub fn severity(self) -> Severity {
        match self {
            Condition::Healthy => Severity::Ok,
            Condition::Degraded => Severity::Critical,
            Condition::Indeterminate => Severity::Unknown,
        }
    }

    pub fn bucket(self) -> Bucket {
        match self {
            Condition::Healthy => Bucket::Normal,
            Condition::Degraded => Bucket::Critical,
            Condition::Indeterminate => Bucket::Unknown,
        }
    }
}

/// Classify one record.
pub fn condition(record: &ProjectedRecord) -> Condition {
    let (Some(state), Some(clear)) = (record.state(), record.error_status_clear()) else {
        return Condition::Indeterminate;
    };
    if state == "OK" && clear {
        Condition::Healthy
    } else {
        Condition::Degraded
    }
}

/// Classify projected records of one type into an evaluation.
///
/// `description` is the free-text label of the component group and, when
/// present, prefixes the summary. The summary counts degraded records only.
pub fn classify(records: &[ProjectedRecord], kind: ComponentKind, description: Option<&str>) -> Evaluation {
    let descriptor = kind.descriptor();
    let mut evaluation = Evaluation::new();
    let mut degraded = 0usize;
    let mut indeterminate = 0usize;

    for record in records {
        if let Some(metric) = descriptor.metric_for(record) {
            evaluation.push_metric(metric);
        }

        let condition = condition(record);
        match condition {
            Condition::Healthy => {}
            Condition::Degraded => degraded += 1,
            Condition::Indeterminate => {
                warn!(identity = %record.key, "Cannot determine health of {}", kind);
                indeterminate += 1;
            }
        }
        evaluation.push(condition.bucket(), descriptor.describe(record));
        evaluation.escalate(condition.severity());
    }

    let prefix = description
        .map(|d| format!("{} - ", d))
        .unwrap_or_default();
    // Indeterminate records rule out the all-OK summary but are not tallied
    evaluation.summary = if degraded == 0 && indeterminate == 0 {
        format!(
            "{}All {} {}s reported a state of OK",
            prefix,
            evaluation.normal.len(),
            descriptor.tag
        )
    } else {
        format!("{}{} {}s with a non-OK state detected", prefix, degraded, descriptor.tag)
    };

    debug!(
        records = records.len(),
        degraded,
        indeterminate,
        severity = %evaluation.severity,
        "Classified {} records",
        kind
    );
    evaluation
}

/// Run a component check: select, project and classify.
///
/// A check that finds no groups, or no records once exclusions are applied,
/// fails with [`ProbeError::NoData`] rather than reporting zero components.
pub fn check_components(snapshot: &Snapshot, scope: Scope, kind: ComponentKind) -> Result<Evaluation> {
    let groups = select(snapshot, scope, kind.category());
    if groups.is_empty() {
        return Err(ProbeError::NoData(kind.category().to_string()));
    }

    let records = project_groups(&groups, kind)?;
    if records.is_empty() {
        return Err(ProbeError::NoData(kind.category().to_string()));
    }

    // The last group that carries a description labels the summary
    let description = if kind.descriptor().describe_group {
        groups
            .iter()
            .rev()
            .find_map(|g| g.description.as_deref().filter(|d| !d.is_empty()))
    } else {
        None
    };

    Ok(classify(&records, kind, description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::project::IdentityKey;
    use probe_types::{GroupBuilder, Snapshot};

    fn record(label: &str, state: Option<&str>, error_status: Option<&str>) -> ProjectedRecord {
        let mut attributes = std::collections::BTreeMap::new();
        attributes.insert("Name".to_string(), label.to_string());
        attributes.insert("Status".to_string(), "Normal".to_string());
        if let Some(state) = state {
            attributes.insert("State".to_string(), state.to_string());
        }
        if let Some(es) = error_status {
            attributes.insert("ErrorStatus".to_string(), es.to_string());
        }
        ProjectedRecord {
            key: IdentityKey::new(label),
            attributes,
        }
    }

    #[test]
    fn test_condition_rule() {
        assert_eq!(condition(&record("a", Some("OK"), Some("0"))), Condition::Healthy);
        assert_eq!(condition(&record("a", Some("Degraded"), Some("0"))), Condition::Degraded);
        assert_eq!(condition(&record("a", Some("OK"), Some("4"))), Condition::Degraded);
        assert_eq!(condition(&record("a", Some("OK"), Some("n/a"))), Condition::Indeterminate);
        assert_eq!(condition(&record("a", Some("OK"), None)), Condition::Indeterminate);
        assert_eq!(condition(&record("a", None, Some("0"))), Condition::Indeterminate);
    }

    #[test]
    fn test_error_status_beyond_i64_is_degraded() {
        let wide = record("a", Some("OK"), Some("99999999999999999999"));
        assert_eq!(condition(&wide), Condition::Degraded);

        let evaluation = classify(&[wide], ComponentKind::Fan, None);
        assert_eq!(evaluation.severity, Severity::Critical);
        assert_eq!(evaluation.critical.len(), 1);
        assert!(evaluation.unknown.is_empty());

        assert_eq!(condition(&record("a", Some("OK"), Some(" -00 "))), Condition::Healthy);
        assert_eq!(condition(&record("a", Some("OK"), Some("-"))), Condition::Indeterminate);
        assert_eq!(condition(&record("a", Some("OK"), Some("1.5"))), Condition::Indeterminate);
    }

    #[test]
    fn test_all_ok_summary() {
        let records = vec![
            record("FAN1", Some("OK"), Some("0")),
            record("FAN2", Some("OK"), Some("0")),
        ];
        let evaluation = classify(&records, ComponentKind::Fan, None);

        assert_eq!(evaluation.severity, Severity::Ok);
        assert_eq!(evaluation.summary, "All 2 fans reported a state of OK");
        assert_eq!(evaluation.normal.len(), 2);
        assert!(evaluation.critical.is_empty());
    }

    #[test]
    fn test_description_prefixes_summary() {
        let records = vec![record("FAN1", Some("Failed"), Some("1"))];
        let evaluation = classify(&records, ComponentKind::Fan, Some("Primary Storage Shelf"));

        assert_eq!(evaluation.severity, Severity::Critical);
        assert_eq!(
            evaluation.summary,
            "Primary Storage Shelf - 1 fans with a non-OK state detected"
        );
        assert_eq!(
            evaluation.critical,
            vec!["Fan 'FAN1' is in the state 'Failed' with a status of 'Normal'"]
        );
    }

    #[test]
    fn test_indeterminate_escalates_to_unknown_and_continues() {
        let records = vec![
            record("FAN1", Some("OK"), Some("?")),
            record("FAN2", Some("Failed"), Some("3")),
            record("FAN3", Some("OK"), Some("0")),
        ];
        let evaluation = classify(&records, ComponentKind::Fan, None);

        assert_eq!(evaluation.severity, Severity::Unknown);
        assert_eq!(evaluation.unknown.len(), 1);
        assert_eq!(evaluation.critical.len(), 1);
        assert_eq!(evaluation.normal.len(), 1);
        assert_eq!(evaluation.summary, "1 fans with a non-OK state detected");
    }

    #[test]
    fn test_only_indeterminate_records_do_not_report_all_ok() {
        let records = vec![
            record("FAN1", Some("OK"), Some("n/a")),
            record("FAN2", Some("OK"), Some("0")),
        ];
        let evaluation = classify(&records, ComponentKind::Fan, None);

        assert_eq!(evaluation.severity, Severity::Unknown);
        assert_eq!(evaluation.summary, "0 fans with a non-OK state detected");
    }

    #[test]
    fn test_disk_summary_ignores_group_description() {
        let snapshot = Snapshot::builder()
            .group(Scope::Enclosure, "disks", |g| {
                g.description("Storage Shelf 1").record("disk", |r| {
                    r.property("Enclosure ID", "1")
                        .property("Slot Number", "4")
                        .property("Serial Number", "SN4")
                        .property("State", "Failed")
                        .property("Status", "Offline")
                        .property("ErrorStatus", "1")
                })
            })
            .build();

        let evaluation = check_components(&snapshot, Scope::Enclosure, ComponentKind::Disk).unwrap();
        assert_eq!(evaluation.summary, "1 disks with a non-OK state detected");
        assert_eq!(evaluation.severity, Severity::Critical);
    }

    #[test]
    fn test_two_disks_one_degraded() {
        let snapshot = Snapshot::builder()
            .group(Scope::Appliance, "disks", |g| {
                g.record("disk", |r| {
                    r.property("Enclosure ID", "0")
                        .property("Slot Number", "1")
                        .property("Serial Number", "SN1")
                        .property("State", "OK")
                        .property("Status", "Online")
                        .property("ErrorStatus", "0")
                })
                .record("disk", |r| {
                    r.property("Enclosure ID", "0")
                        .property("Slot Number", "2")
                        .property("Serial Number", "SN2")
                        .property("State", "Degraded")
                        .property("Status", "Rebuilding")
                        .property("ErrorStatus", "1")
                })
            })
            .build();

        let evaluation = check_components(&snapshot, Scope::Appliance, ComponentKind::Disk).unwrap();
        assert_eq!(evaluation.summary, "1 disks with a non-OK state detected");
        assert_eq!(evaluation.severity, Severity::Critical);
        assert_eq!(
            evaluation.critical,
            vec!["Disk '2' with S/N 'SN2' in enclosure '0' is in the state 'Degraded' with a status of 'Rebuilding'"]
        );
        assert_eq!(evaluation.normal.len(), 1);
    }

    #[test]
    fn test_temperature_margins_excluded_from_lines_and_metrics() {
        let snapshot = Snapshot::builder()
            .group(Scope::Enclosure, "temperatures", |g| {
                g.record("temperature", |r| {
                    r.property("Type", "Inlet")
                        .property("Temperature", "24 C")
                        .property("State", "OK")
                        .property("Status", "OK")
                        .property("ErrorStatus", "0")
                })
                .record("temperature", |r| {
                    r.property("Type", "Inlet Margin")
                        .property("Temperature", "-20 C")
                        .property("State", "OK")
                        .property("Status", "OK")
                        .property("ErrorStatus", "0")
                })
            })
            .build();

        let evaluation =
            check_components(&snapshot, Scope::Enclosure, ComponentKind::Temperature).unwrap();
        assert_eq!(evaluation.summary, "All 1 temperatures reported a state of OK");
        assert_eq!(evaluation.metrics.len(), 1);
        assert_eq!(evaluation.metrics[0].to_string(), "'Inlet'=24;;;;");
        assert!(evaluation.normal.iter().all(|l| !l.contains("Margin")));
    }

    #[test]
    fn test_partition_placeholder_usage_has_no_metric() {
        let snapshot = Snapshot::builder()
            .group(Scope::Appliance, "partitions", |g| {
                g.record("partition", |r| {
                    r.property("Partition", "MSDP")
                        .property("Used", "71%")
                        .property("State", "OK")
                        .property("Status", "OK")
                        .property("ErrorStatus", "0")
                })
                .record("partition", |r| {
                    r.property("Partition", "Catalog")
                        .property("Used", "-")
                        .property("State", "OK")
                        .property("Status", "OK")
                        .property("ErrorStatus", "0")
                })
            })
            .build();

        let evaluation =
            check_components(&snapshot, Scope::Appliance, ComponentKind::Partition).unwrap();
        let metrics: Vec<String> = evaluation.metrics.iter().map(ToString::to_string).collect();
        assert_eq!(metrics, vec!["'MSDP_used'=71%"]);
        assert_eq!(evaluation.normal.len(), 2);
    }

    #[test]
    fn test_no_matching_group_is_no_data() {
        let snapshot = Snapshot::builder()
            .group(Scope::Appliance, "fans", |g| g.record("fan", |r| r.property("Name", "F")))
            .build();

        let err = check_components(&snapshot, Scope::Enclosure, ComponentKind::Fan).unwrap_err();
        assert!(matches!(err, ProbeError::NoData(_)));
        assert_eq!(
            err.to_string(),
            "No data to parse for fans using the specified arguments"
        );
    }

    #[test]
    fn test_group_without_records_is_no_data() {
        let snapshot = Snapshot::builder()
            .component_group(GroupBuilder::new("appliance", "msdps").build())
            .build();

        let err = check_components(&snapshot, Scope::Appliance, ComponentKind::Msdp).unwrap_err();
        assert!(matches!(err, ProbeError::NoData(_)));
    }

    #[test]
    fn test_records_across_enclosure_groups_are_combined() {
        let snapshot = Snapshot::builder()
            .group(Scope::Enclosure, "powers", |g| {
                g.description("Enclosure 1")
                    .record("power", |r| {
                        r.id("PS1").property("State", "OK").property("ErrorStatus", "0")
                    })
            })
            .group(Scope::Enclosure, "powers", |g| {
                g.description("Enclosure 2")
                    .record("power", |r| {
                        r.id("PS2").property("State", "OK").property("ErrorStatus", "0")
                    })
            })
            .build();

        let evaluation = check_components(&snapshot, Scope::Enclosure, ComponentKind::Power).unwrap();
        assert_eq!(evaluation.summary, "Enclosure 2 - All 2 powers reported a state of OK");
    }
}
