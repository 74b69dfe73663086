//! Snapshot sources.
//!
//! This module provides a trait-based abstraction for obtaining the appliance
//! report a check runs against. The file source is what the command-line
//! plugin uses; the memory source serves library consumers that already hold
//! the document (for example after fetching it over SSH).

mod file;
mod memory;
pub mod xml;

pub use file::FileSource;
pub use memory::MemorySource;

use std::fmt::Debug;

use probe_types::Snapshot;

use crate::error::Result;

/// Trait for loading an appliance snapshot.
///
/// A source is read exactly once per check, to completion, before any
/// evaluation begins.
///
/// # Example
///
/// ```
/// use appliance_probe::{MemorySource, SnapshotSource};
///
/// let source = MemorySource::new(
///     "<monitorResponse><computenode><epoch>0</epoch></computenode></monitorResponse>",
/// );
/// let snapshot = source.load().unwrap();
/// assert_eq!(snapshot.epoch.as_deref(), Some("0"));
/// ```
pub trait SnapshotSource: Debug {
    /// Read and parse the snapshot.
    fn load(&self) -> Result<Snapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// Parse report markup into a snapshot.
pub fn parse_snapshot(content: &str) -> Result<Snapshot> {
    let document = xml::parse_document(content)?;
    xml::to_snapshot(&document)
}
