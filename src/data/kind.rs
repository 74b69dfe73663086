//! Component types and their descriptor table.
//!
//! Everything that differs between component types lives in one
//! [`Descriptor`] per type: how a record is identified, how its report line
//! reads and which metric it contributes. The projection and classification
//! code is written once against descriptors, so supporting another component
//! type means adding a table entry.

use std::fmt;
use std::str::FromStr;

use probe_types::{Metric, MetricRange, Scope};

use super::project::ProjectedRecord;
use crate::error::ProbeError;

/// A component type the probe knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Disk,
    Fan,
    Power,
    RaidGroup,
    Partition,
    FibreChannel,
    Adapter,
    Msdp,
    Temperature,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Disk,
        ComponentKind::Fan,
        ComponentKind::Power,
        ComponentKind::RaidGroup,
        ComponentKind::Partition,
        ComponentKind::FibreChannel,
        ComponentKind::Adapter,
        ComponentKind::Msdp,
        ComponentKind::Temperature,
    ];

    /// The descriptor driving projection and rendering for this type.
    pub fn descriptor(self) -> &'static Descriptor {
        match self {
            ComponentKind::Disk => &DISK,
            ComponentKind::Fan => &FAN,
            ComponentKind::Power => &POWER,
            ComponentKind::RaidGroup => &RAIDGROUP,
            ComponentKind::Partition => &PARTITION,
            ComponentKind::FibreChannel => &FIBRECHANNEL,
            ComponentKind::Adapter => &ADAPTER,
            ComponentKind::Msdp => &MSDP,
            ComponentKind::Temperature => &TEMPERATURE,
        }
    }

    /// Look up a type by its category name (`disks`, `fans`, ...).
    pub fn from_category(category: &str) -> Result<Self, ProbeError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.descriptor().category == category)
            .ok_or_else(|| ProbeError::UnsupportedKind(category.to_string()))
    }

    /// Element name of one record of this type.
    pub fn tag(self) -> &'static str {
        self.descriptor().tag
    }

    /// Category name of a group of this type.
    pub fn category(self) -> &'static str {
        self.descriptor().category
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parses the record element name (`disk`, `fan`, `msdp`, ...).
impl FromStr for ComponentKind {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ProbeError::UnsupportedKind(s.to_string()))
    }
}

/// Where a record's identity key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// A named property.
    Attribute(&'static str),
    /// The hardware id carried next to the property list.
    HardwareId,
    /// A slot number that is only unique within its enclosure.
    SlotInEnclosure {
        slot: &'static str,
        enclosure: &'static str,
    },
}

/// Metric a record contributes besides its report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricRule {
    /// `'<identity><suffix>'=<value>`, skipped when the value is the placeholder.
    Usage {
        attribute: &'static str,
        suffix: &'static str,
        placeholder: &'static str,
    },
    /// `'<identity>'=<number>;;;;`, the unit following the number is dropped.
    Reading { attribute: &'static str },
}

/// Per-type projection and rendering rules.
#[derive(Debug)]
pub struct Descriptor {
    pub kind: ComponentKind,
    /// Record element name, also the singular used in summaries.
    pub tag: &'static str,
    /// Group element name.
    pub category: &'static str,
    /// Capitalised name starting each report line.
    pub title: &'static str,
    /// Scopes this type may be checked under.
    pub scopes: &'static [Scope],
    pub identity: IdentitySource,
    /// `(phrase, attribute)` pairs rendered between identity and state.
    pub qualifiers: &'static [(&'static str, &'static str)],
    /// `(phrase, attribute)` of the status clause ending the line.
    pub status: (&'static str, &'static str),
    pub metric: Option<MetricRule>,
    /// Records whose identity contains this marker are not components.
    pub exclude_marker: Option<&'static str>,
    /// Whether the group description prefixes the summary.
    pub describe_group: bool,
}

const ANY_SCOPE: &[Scope] = &[Scope::Appliance, Scope::Enclosure];
const APPLIANCE_ONLY: &[Scope] = &[Scope::Appliance];
const STATUS: (&str, &str) = ("a status of", "Status");

static DISK: Descriptor = Descriptor {
    kind: ComponentKind::Disk,
    tag: "disk",
    category: "disks",
    title: "Disk",
    scopes: ANY_SCOPE,
    identity: IdentitySource::SlotInEnclosure {
        slot: "Slot Number",
        enclosure: "Enclosure ID",
    },
    qualifiers: &[("with S/N", "Serial Number"), ("in enclosure", "Enclosure ID")],
    status: STATUS,
    metric: None,
    exclude_marker: None,
    describe_group: false,
};

static FAN: Descriptor = Descriptor {
    kind: ComponentKind::Fan,
    tag: "fan",
    category: "fans",
    title: "Fan",
    scopes: ANY_SCOPE,
    identity: IdentitySource::Attribute("Name"),
    qualifiers: &[],
    status: STATUS,
    metric: None,
    exclude_marker: None,
    describe_group: true,
};

static POWER: Descriptor = Descriptor {
    kind: ComponentKind::Power,
    tag: "power",
    category: "powers",
    title: "Power",
    scopes: ANY_SCOPE,
    identity: IdentitySource::HardwareId,
    qualifiers: &[],
    status: STATUS,
    metric: None,
    exclude_marker: None,
    describe_group: true,
};

static RAIDGROUP: Descriptor = Descriptor {
    kind: ComponentKind::RaidGroup,
    tag: "raidgroup",
    category: "raidgroups",
    title: "Raidgroup",
    scopes: APPLIANCE_ONLY,
    identity: IdentitySource::Attribute("Name"),
    qualifiers: &[("with a WWID of", "WWID")],
    status: STATUS,
    metric: None,
    exclude_marker: None,
    describe_group: true,
};

static PARTITION: Descriptor = Descriptor {
    kind: ComponentKind::Partition,
    tag: "partition",
    category: "partitions",
    title: "Partition",
    scopes: APPLIANCE_ONLY,
    identity: IdentitySource::Attribute("Partition"),
    qualifiers: &[("with a usage of", "Used")],
    status: STATUS,
    metric: Some(MetricRule::Usage {
        attribute: "Used",
        suffix: "_used",
        placeholder: "-",
    }),
    exclude_marker: None,
    describe_group: true,
};

static FIBRECHANNEL: Descriptor = Descriptor {
    kind: ComponentKind::FibreChannel,
    tag: "fibrechannel",
    category: "fibrechannels",
    title: "Fibrechannel",
    scopes: APPLIANCE_ONLY,
    identity: IdentitySource::HardwareId,
    qualifiers: &[("with a WWN of", "Port WWN")],
    status: STATUS,
    metric: None,
    exclude_marker: None,
    describe_group: true,
};

static ADAPTER: Descriptor = Descriptor {
    kind: ComponentKind::Adapter,
    tag: "adapter",
    category: "adapters",
    title: "Adapter",
    scopes: APPLIANCE_ONLY,
    identity: IdentitySource::Attribute("Adapter model"),
    qualifiers: &[],
    status: ("an adapter status of", "Adapter Status"),
    metric: None,
    exclude_marker: None,
    describe_group: true,
};

static MSDP: Descriptor = Descriptor {
    kind: ComponentKind::Msdp,
    tag: "msdp",
    category: "msdps",
    title: "Msdp",
    scopes: APPLIANCE_ONLY,
    identity: IdentitySource::HardwareId,
    qualifiers: &[],
    status: STATUS,
    metric: None,
    exclude_marker: None,
    describe_group: true,
};

static TEMPERATURE: Descriptor = Descriptor {
    kind: ComponentKind::Temperature,
    tag: "temperature",
    category: "temperatures",
    title: "Temperature",
    scopes: ANY_SCOPE,
    identity: IdentitySource::Attribute("Type"),
    qualifiers: &[("with a temperature of", "Temperature")],
    status: STATUS,
    metric: Some(MetricRule::Reading {
        attribute: "Temperature",
    }),
    exclude_marker: Some("Margin"),
    describe_group: true,
};

impl Descriptor {
    /// Whether this type may be checked under the given scope.
    pub fn allows(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Render the report line for a record.
    ///
    /// Attributes the record does not carry render as empty quotes.
    pub fn describe(&self, record: &ProjectedRecord) -> String {
        let mut line = format!("{} '{}'", self.title, record.key.label);
        for (phrase, attribute) in self.qualifiers {
            line.push_str(&format!(" {} '{}'", phrase, record.attr(attribute)));
        }
        let (phrase, attribute) = self.status;
        line.push_str(&format!(
            " is in the state '{}' with {} '{}'",
            record.attr("State"),
            phrase,
            record.attr(attribute)
        ));
        line
    }

    /// The metric token a record contributes, if any.
    pub fn metric_for(&self, record: &ProjectedRecord) -> Option<Metric> {
        match self.metric? {
            MetricRule::Usage {
                attribute,
                suffix,
                placeholder,
            } => {
                let value = record.attributes.get(attribute)?;
                if value == placeholder {
                    return None;
                }
                Some(Metric::new(format!("{}{}", record.key.label, suffix), value))
            }
            MetricRule::Reading { attribute } => {
                let value = record.attributes.get(attribute)?;
                let number = value.split(' ').next().unwrap_or_default();
                Some(Metric::new(&record.key.label, number).with_range(MetricRange::empty()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::project::IdentityKey;

    fn record(label: &str, pairs: &[(&str, &str)]) -> ProjectedRecord {
        ProjectedRecord {
            key: IdentityKey::new(label),
            attributes: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_descriptor_table_is_consistent() {
        for kind in ComponentKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor.kind, kind);
            assert_eq!(ComponentKind::from_category(descriptor.category).unwrap(), kind);
            assert_eq!(descriptor.tag.parse::<ComponentKind>().unwrap(), kind);
            assert!(descriptor.allows(Scope::Appliance));
            assert_eq!(descriptor.describe_group, kind != ComponentKind::Disk);
        }
    }

    #[test]
    fn test_enclosure_scope_is_limited() {
        let enclosure: Vec<_> = ComponentKind::ALL
            .into_iter()
            .filter(|k| k.descriptor().allows(Scope::Enclosure))
            .collect();
        assert_eq!(
            enclosure,
            vec![
                ComponentKind::Disk,
                ComponentKind::Fan,
                ComponentKind::Power,
                ComponentKind::Temperature
            ]
        );
    }

    #[test]
    fn test_unknown_type_fails() {
        assert!(matches!(
            "tapedrive".parse::<ComponentKind>(),
            Err(ProbeError::UnsupportedKind(_))
        ));
        assert!(ComponentKind::from_category("tapedrives").is_err());
    }

    #[test]
    fn test_describe_disk() {
        let disk = ProjectedRecord {
            key: IdentityKey::in_enclosure("0", "3"),
            attributes: [
                ("Serial Number", "S123"),
                ("Enclosure ID", "0"),
                ("State", "OK"),
                ("Status", "Online"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        };
        assert_eq!(
            DISK.describe(&disk),
            "Disk '3' with S/N 'S123' in enclosure '0' is in the state 'OK' with a status of 'Online'"
        );
    }

    #[test]
    fn test_describe_adapter() {
        let adapter = record(
            "QLE2692",
            &[("State", "OK"), ("Adapter Status", "Optimal")],
        );
        assert_eq!(
            ADAPTER.describe(&adapter),
            "Adapter 'QLE2692' is in the state 'OK' with an adapter status of 'Optimal'"
        );
    }

    #[test]
    fn test_describe_raidgroup_with_missing_attribute() {
        let raid = record("RAID-1", &[("State", "OK"), ("Status", "Optimal")]);
        assert_eq!(
            RAIDGROUP.describe(&raid),
            "Raidgroup 'RAID-1' with a WWID of '' is in the state 'OK' with a status of 'Optimal'"
        );
    }

    #[test]
    fn test_partition_usage_metric() {
        let used = record("MSDP", &[("Used", "62%")]);
        assert_eq!(
            PARTITION.metric_for(&used).unwrap().to_string(),
            "'MSDP_used'=62%"
        );

        let placeholder = record("Configuration", &[("Used", "-")]);
        assert!(PARTITION.metric_for(&placeholder).is_none());
    }

    #[test]
    fn test_temperature_reading_metric_drops_unit() {
        let temp = record("CPU1 Temp", &[("Temperature", "41 degrees C")]);
        assert_eq!(
            TEMPERATURE.metric_for(&temp).unwrap().to_string(),
            "'CPU1 Temp'=41;;;;"
        );
    }

    #[test]
    fn test_types_without_metrics() {
        let fan = record("FAN1", &[("State", "OK")]);
        assert!(FAN.metric_for(&fan).is_none());
    }
}
