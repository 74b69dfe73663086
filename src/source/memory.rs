//! In-memory snapshot source.

use probe_types::Snapshot;

use super::{parse_snapshot, SnapshotSource};
use crate::error::Result;

/// A source holding the report markup in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    content: String,
}

impl MemorySource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl SnapshotSource for MemorySource {
    fn load(&self) -> Result<Snapshot> {
        parse_snapshot(&self.content)
    }

    fn description(&self) -> &str {
        "memory"
    }
}
