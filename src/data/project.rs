//! Record projection: raw property lists to keyed attribute maps.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use probe_types::{ComponentGroup, RawRecord};
use tracing::{debug, warn};

use super::kind::{ComponentKind, IdentitySource};
use crate::error::{ProbeError, Result};

/// The label a record is addressed and deduplicated by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    /// Enclosure the label is scoped to, for types numbered per enclosure.
    pub enclosure: Option<String>,
    /// Label shown in report lines and metric names.
    pub label: String,
}

impl IdentityKey {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enclosure: None,
            label: label.into(),
        }
    }

    pub fn in_enclosure(enclosure: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            enclosure: Some(enclosure.into()),
            label: label.into(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.enclosure {
            Some(enclosure) => write!(f, "{}/{}", enclosure, self.label),
            None => f.write_str(&self.label),
        }
    }
}

/// A record flattened once into its attributes, with its identity resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRecord {
    pub key: IdentityKey,
    pub attributes: BTreeMap<String, String>,
}

impl ProjectedRecord {
    /// Attribute value, or an empty string when absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or_default()
    }

    /// The reported `State`.
    pub fn state(&self) -> Option<&str> {
        self.attributes.get("State").map(String::as_str)
    }

    /// Whether the reported `ErrorStatus` is zero.
    ///
    /// `None` when the field is missing or not an integer. Integers of any
    /// width are accepted.
    pub fn error_status_clear(&self) -> Option<bool> {
        let raw = self.attributes.get("ErrorStatus")?.trim();
        let digits = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(digits.bytes().all(|b| b == b'0'))
    }
}

/// Project one raw record as the given component type.
///
/// Returns `Ok(None)` for records the type excludes (temperature margins).
/// A record without the attribute its identity is built from is a layout
/// error and fails the check.
pub fn project(record: &RawRecord, kind: ComponentKind) -> Result<Option<ProjectedRecord>> {
    let descriptor = kind.descriptor();
    let attributes = record.flatten();

    let require = |name: &str| -> Result<String> {
        attributes
            .get(name)
            .cloned()
            .ok_or_else(|| ProbeError::MissingIdentity {
                tag: descriptor.tag.to_string(),
                attribute: name.to_string(),
            })
    };

    let key = match descriptor.identity {
        IdentitySource::Attribute(name) => IdentityKey::new(require(name)?),
        IdentitySource::HardwareId => {
            IdentityKey::new(record.id.clone().ok_or_else(|| ProbeError::MissingIdentity {
                tag: descriptor.tag.to_string(),
                attribute: "id".to_string(),
            })?)
        }
        IdentitySource::SlotInEnclosure { slot, enclosure } => {
            IdentityKey::in_enclosure(require(enclosure)?, require(slot)?)
        }
    };

    if let Some(marker) = descriptor.exclude_marker {
        if key.label.contains(marker) {
            debug!(identity = %key, "Excluding {} record", kind);
            return Ok(None);
        }
    }

    Ok(Some(ProjectedRecord { key, attributes }))
}

/// Project every record of the given type across the selected groups.
///
/// Records sharing an identity key collapse into one: the later record's
/// attributes replace the earlier ones at the earlier position. Records
/// scoped to an enclosure are then grouped by enclosure, in order of each
/// enclosure's first appearance.
pub fn project_groups(groups: &[&ComponentGroup], kind: ComponentKind) -> Result<Vec<ProjectedRecord>> {
    let tag = kind.tag();
    let mut records: Vec<ProjectedRecord> = Vec::new();
    let mut positions: HashMap<IdentityKey, usize> = HashMap::new();

    for group in groups {
        if group.is_empty() {
            debug!(scope = %group.scope, category = %group.category, "Group carries no records");
            continue;
        }
        for raw in &group.records {
            if raw.tag != tag {
                debug!(category = %group.category, element = %raw.tag, "Skipping foreign element");
                continue;
            }
            let Some(projected) = project(raw, kind)? else {
                continue;
            };
            match positions.get(&projected.key) {
                Some(&position) => {
                    warn!(identity = %projected.key, "Duplicate {} identity, keeping the later record", kind);
                    records[position] = projected;
                }
                None => {
                    positions.insert(projected.key.clone(), records.len());
                    records.push(projected);
                }
            }
        }
    }

    let mut enclosure_order: HashMap<Option<String>, usize> = HashMap::new();
    for record in &records {
        let next = enclosure_order.len();
        enclosure_order
            .entry(record.key.enclosure.clone())
            .or_insert(next);
    }
    records.sort_by_key(|r| enclosure_order.get(&r.key.enclosure).copied().unwrap_or_default());

    Ok(records)
}
