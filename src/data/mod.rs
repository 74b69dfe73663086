//! The evaluation engine.
//!
//! This module turns a parsed [`Snapshot`](probe_types::Snapshot) into an
//! [`Evaluation`] for one check.
//!
//! ## Submodules
//!
//! - [`select`]: Picks the component groups a check is about
//! - [`kind`]: Component types and the per-type [`Descriptor`] table
//! - [`project`]: Flattens raw records and resolves their identity keys
//! - [`classify`]: The health rule and summary for component checks
//! - [`epoch`]: Clock skew check of the report timestamp
//! - [`evaluation`]: The accumulated result consumed by the renderer
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot
//!    │
//!    ├──▶ select() ──▶ project_groups() ──▶ classify() ──┐
//!    │                                                     ├──▶ Evaluation
//!    └──▶ check_epoch() ──────────────────────────────────┘
//! ```

pub mod classify;
pub mod epoch;
pub mod evaluation;
pub mod kind;
pub mod project;
pub mod select;

pub use classify::{check_components, classify, condition, Condition};
pub use epoch::{check_epoch, evaluate_epoch, unix_now, EpochThresholds};
pub use evaluation::{Bucket, Evaluation};
pub use kind::{ComponentKind, Descriptor, IdentitySource, MetricRule};
pub use project::{project, project_groups, IdentityKey, ProjectedRecord};
pub use select::select;
