//! Probe settings from configuration files and the environment.
//!
//! Schedulers that cannot pass per-check arguments can supply the epoch
//! thresholds through a settings file or `APPLIANCE_PROBE_*` environment
//! variables instead. Command-line values take precedence over both.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::data::EpochThresholds;
use crate::error::ProbeError;

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "APPLIANCE_PROBE";

/// Settings a check may need besides the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Epoch warning slack in seconds.
    pub warning: Option<i64>,
    /// Epoch critical slack in seconds.
    pub critical: Option<i64>,
}

impl Settings {
    /// Load settings from an optional file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Apply command-line values over the loaded ones.
    pub fn with_overrides(self, warning: Option<i64>, critical: Option<i64>) -> Self {
        Self {
            warning: warning.or(self.warning),
            critical: critical.or(self.critical),
        }
    }

    /// Thresholds for the epoch check; both must be set.
    pub fn epoch_thresholds(&self) -> Result<EpochThresholds, ProbeError> {
        let warning = self.warning.ok_or(ProbeError::MissingThreshold("warning"))?;
        let critical = self.critical.ok_or(ProbeError::MissingThreshold("critical"))?;
        Ok(EpochThresholds::new(warning, critical))
    }
}
