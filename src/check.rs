//! Check selection and dispatch.

use std::fmt;

use probe_types::{Scope, Snapshot};
use tracing::info;

use crate::config::Settings;
use crate::data::{check_components, check_epoch, ComponentKind, Evaluation};
use crate::error::{ProbeError, Result};

/// The single check one invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Skew between the report timestamp and the local clock.
    Epoch,
    /// Health of one component type under one scope.
    Component { scope: Scope, kind: ComponentKind },
}

impl Check {
    /// Resolve the `--appliance-check` / `--enclosure-check` values.
    ///
    /// The appliance flag is consulted first when both are given.
    pub fn from_flags(appliance: Option<&str>, enclosure: Option<&str>) -> Result<Self> {
        match (appliance, enclosure) {
            (Some(name), _) => Self::parse(Scope::Appliance, name),
            (None, Some(name)) => Self::parse(Scope::Enclosure, name),
            (None, None) => Err(ProbeError::NoCheck),
        }
    }

    /// Resolve a check name under a scope.
    pub fn parse(scope: Scope, name: &str) -> Result<Self> {
        let undefined = || ProbeError::UndefinedCheck {
            flag: match scope {
                Scope::Appliance => "appliance-check",
                Scope::Enclosure => "enclosure-check",
            },
            value: name.to_string(),
        };

        if name == "epoch" {
            return match scope {
                Scope::Appliance => Ok(Check::Epoch),
                Scope::Enclosure => Err(undefined()),
            };
        }

        let kind = ComponentKind::from_category(name).map_err(|_| undefined())?;
        if !kind.descriptor().allows(scope) {
            return Err(undefined());
        }
        Ok(Check::Component { scope, kind })
    }

    /// Evaluate this check against a snapshot.
    ///
    /// `now` is the local time in seconds since the Unix epoch.
    pub fn run(&self, snapshot: &Snapshot, settings: &Settings, now: f64) -> Result<Evaluation> {
        info!(check = %self, "Running check");
        match *self {
            Check::Epoch => check_epoch(snapshot, now, &settings.epoch_thresholds()?),
            Check::Component { scope, kind } => check_components(snapshot, scope, kind),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Epoch => f.write_str("appliance epoch"),
            Check::Component { scope, kind } => write!(f, "{} {}", scope, kind.category()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appliance_checks() {
        assert_eq!(Check::from_flags(Some("epoch"), None).unwrap(), Check::Epoch);
        for name in [
            "disks",
            "fans",
            "powers",
            "raidgroups",
            "partitions",
            "fibrechannels",
            "adapters",
            "msdps",
            "temperatures",
        ] {
            let check = Check::from_flags(Some(name), None).unwrap();
            assert!(matches!(check, Check::Component { scope: Scope::Appliance, .. }));
        }
    }

    #[test]
    fn test_enclosure_checks() {
        for name in ["disks", "fans", "powers", "temperatures"] {
            let check = Check::from_flags(None, Some(name)).unwrap();
            assert!(matches!(check, Check::Component { scope: Scope::Enclosure, .. }));
        }
    }

    #[test]
    fn test_appliance_only_checks_rejected_for_enclosures() {
        for name in ["epoch", "raidgroups", "partitions", "fibrechannels", "adapters", "msdps"] {
            let err = Check::from_flags(None, Some(name)).unwrap_err();
            assert_eq!(err.to_string(), format!("Undefined --enclosure-check: {}", name));
        }
    }

    #[test]
    fn test_undefined_and_missing_checks() {
        let err = Check::from_flags(Some("tapes"), None).unwrap_err();
        assert_eq!(err.to_string(), "Undefined --appliance-check: tapes");

        assert!(matches!(Check::from_flags(None, None), Err(ProbeError::NoCheck)));
    }

    #[test]
    fn test_epoch_without_thresholds() {
        let snapshot = Snapshot::builder().epoch("0").build();
        let err = Check::Epoch
            .run(&snapshot, &Settings::default(), 0.0)
            .unwrap_err();
        assert!(matches!(err, ProbeError::MissingThreshold("warning")));
    }

    #[test]
    fn test_display() {
        let check = Check::from_flags(None, Some("fans")).unwrap();
        assert_eq!(check.to_string(), "enclosure fans");
    }
}
