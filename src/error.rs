//! Error types for loading snapshots and running checks.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a check.
///
/// Every variant is fatal for the current invocation and is reported as an
/// `UNKNOWN` result. Per-record data problems are not errors; they are
/// classified as indeterminate and flow through the report instead.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The snapshot file could not be read.
    #[error("Failed to read snapshot '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not well-formed markup.
    #[error("Malformed snapshot document: {0}")]
    Parse(String),

    /// The markup is well-formed but not shaped like an appliance report.
    #[error("Unexpected snapshot layout: {0}")]
    Shape(String),

    /// Nothing in the snapshot matched the requested check.
    #[error("No data to parse for {0} using the specified arguments")]
    NoData(String),

    /// A check flag carried a value that names no check.
    #[error("Undefined --{flag}: {value}")]
    UndefinedCheck { flag: &'static str, value: String },

    /// Neither check flag was given.
    #[error("No check selected, use --appliance-check or --enclosure-check")]
    NoCheck,

    /// The epoch check needs both thresholds.
    #[error("The epoch check requires a --{0} threshold in seconds")]
    MissingThreshold(&'static str),

    /// The snapshot carries no usable timestamp.
    #[error("Invalid epoch in snapshot: '{0}'")]
    InvalidEpoch(String),

    /// A record lacks the attribute its identity key is built from.
    #[error("A {tag} record is missing its identity attribute '{attribute}'")]
    MissingIdentity { tag: String, attribute: String },

    /// A component type this probe has no descriptor for.
    #[error("Unsupported component type: {0}")]
    UnsupportedKind(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
