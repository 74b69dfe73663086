//! File-based snapshot source.
//!
//! Reads an appliance report that was already transferred to the monitoring
//! host.

use std::fs;
use std::path::{Path, PathBuf};

use probe_types::Snapshot;
use tracing::debug;

use super::{parse_snapshot, SnapshotSource};
use crate::error::{ProbeError, Result};

/// A source that reads an appliance report from a file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn load(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.path).map_err(|source| ProbeError::Read {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = content.len(), "Read snapshot file");

        let snapshot = parse_snapshot(&content)?;
        debug!(
            groups = snapshot.groups.len(),
            records = snapshot.total_records(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
