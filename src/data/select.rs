//! Component group selection.

use probe_types::{ComponentGroup, Scope, Snapshot};
use tracing::debug;

/// Select the groups of one category reported under one scope.
///
/// An empty result is not an error here; callers decide what a check with
/// nothing to evaluate means.
pub fn select<'a>(snapshot: &'a Snapshot, scope: Scope, category: &str) -> Vec<&'a ComponentGroup> {
    let groups: Vec<&ComponentGroup> = snapshot
        .groups
        .iter()
        .filter(|g| g.in_scope(scope) && g.category == category)
        .collect();
    debug!(%scope, category, matched = groups.len(), "Selected component groups");
    groups
}
