//! Snapshot - the parsed, point-in-time health report of one appliance.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// The grouping level a component group was reported under.
///
/// Appliances report their own components and, separately, those of every
/// attached storage enclosure. Both levels reuse the same category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scope {
    Appliance,
    Enclosure,
}

impl Scope {
    /// The name used for this scope in the snapshot document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Appliance => "appliance",
            Scope::Enclosure => "enclosure",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScopeError(pub String);

impl fmt::Display for ParseScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scope '{}'", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseScopeError {}

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appliance" => Ok(Scope::Appliance),
            "enclosure" => Ok(Scope::Enclosure),
            other => Err(ParseScopeError(other.to_string())),
        }
    }
}

/// A single `(name, value)` pair reported for a record.
///
/// Values are always text, numeric fields included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One hardware or status record as it appears in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawRecord {
    /// Element name of the record (`disk`, `fan`, `msdp`, ...).
    pub tag: String,

    /// Hardware id carried next to the property list, when present.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,

    /// Properties in document order.
    pub properties: Vec<Property>,
}

impl RawRecord {
    /// Create an empty record with the given element name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Flatten the property list into a name -> value map.
    ///
    /// When a property name repeats, the later value wins.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        self.properties
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect()
    }

    /// Look up the first property with the given name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// A named collection of same-category records within one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentGroup {
    /// Scope name as reported (`appliance`, `enclosure`).
    pub scope: String,

    /// Category name (`disks`, `fans`, `msdps`, ...).
    pub category: String,

    /// Free-text description attached to the group.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,

    pub records: Vec<RawRecord>,
}

impl ComponentGroup {
    pub fn new(scope: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            category: category.into(),
            description: None,
            records: Vec::new(),
        }
    }

    /// Check whether this group was reported under the given scope.
    pub fn in_scope(&self, scope: Scope) -> bool {
        self.scope == scope.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// A parsed appliance snapshot.
///
/// Read-only once built. The loader keeps the embedded epoch as text so a
/// malformed timestamp only fails the epoch check.
///
/// # Example
///
/// ```rust
/// use probe_types::{Scope, Snapshot};
///
/// let snapshot = Snapshot::builder()
///     .group(Scope::Enclosure, "powers", |g| {
///         g.record("power", |r| r.id("PSU-0").property("State", "OK"))
///     })
///     .build();
///
/// assert!(snapshot.epoch.is_none());
/// assert_eq!(snapshot.groups[0].records[0].id.as_deref(), Some("PSU-0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Seconds since the Unix epoch when the appliance produced the report.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub epoch: Option<String>,

    /// Component groups in document order.
    pub groups: Vec<ComponentGroup>,
}

impl Snapshot {
    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Total records across all groups.
    pub fn total_records(&self) -> usize {
        self.groups.iter().map(ComponentGroup::len).sum()
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Builder for `Snapshot`.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    epoch: Option<String>,
    groups: Vec<ComponentGroup>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embedded epoch text.
    pub fn epoch(mut self, epoch: impl Into<String>) -> Self {
        self.epoch = Some(epoch.into());
        self
    }

    /// Add a component group built using a closure.
    pub fn group<F>(mut self, scope: Scope, category: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        let group = f(GroupBuilder::new(scope.as_str(), category)).build();
        self.groups.push(group);
        self
    }

    /// Add a pre-built component group.
    pub fn component_group(mut self, group: ComponentGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        Snapshot {
            epoch: self.epoch,
            groups: self.groups,
        }
    }
}

/// Builder for `ComponentGroup`.
#[derive(Debug)]
pub struct GroupBuilder {
    group: ComponentGroup,
}

impl GroupBuilder {
    pub fn new(scope: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            group: ComponentGroup::new(scope, category),
        }
    }

    /// Attach a free-text description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.group.description = Some(description.into());
        self
    }

    /// Add a record built using a closure.
    pub fn record<F>(mut self, tag: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(RecordBuilder) -> RecordBuilder,
    {
        let record = f(RecordBuilder::new(tag)).build();
        self.group.records.push(record);
        self
    }

    pub fn build(self) -> ComponentGroup {
        self.group
    }
}

/// Builder for `RawRecord`.
#[derive(Debug)]
pub struct RecordBuilder {
    record: RawRecord,
}

impl RecordBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            record: RawRecord::new(tag),
        }
    }

    /// Set the hardware id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.id = Some(id.into());
        self
    }

    /// Append a property.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.properties.push(Property::new(name, value));
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}
