//! # probe-types
//!
//! Core types shared by appliance health probes. This crate defines the
//! vocabulary the evaluation engine works in: the typed snapshot tree a
//! loader produces, the ordered [`Severity`] scale with its exit-code
//! mapping, and the [`Metric`] tokens emitted for the monitoring scheduler.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature for JSON export
//! - **Loader agnostic**: Any markup parser can fill a [`Snapshot`]; the engine never
//!   sees the document format
//! - **Ergonomic builders**: Fluent API for constructing snapshots in tests and tools
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use probe_types::{Scope, Snapshot};
//!
//! let snapshot = Snapshot::builder()
//!     .epoch("1700000000")
//!     .group(Scope::Appliance, "fans", |g| {
//!         g.record("fan", |r| {
//!             r.property("Name", "FAN1")
//!                 .property("State", "OK")
//!                 .property("ErrorStatus", "0")
//!         })
//!     })
//!     .build();
//!
//! assert_eq!(snapshot.groups.len(), 1);
//! assert_eq!(snapshot.groups[0].records[0].flatten()["Name"], "FAN1");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod metric;
mod severity;
mod snapshot;

pub use metric::*;
pub use severity::*;
pub use snapshot::*;
