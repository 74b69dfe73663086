//! # appliance-probe
//!
//! A monitoring plugin and library for evaluating the hardware status report
//! of a NetBackup appliance.
//!
//! Each invocation evaluates exactly one check (the report timestamp, or one
//! component type such as disks or fans under the appliance or enclosure
//! scope) and produces a single status line with performance data, detail
//! lines, and the matching plugin exit code.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          check-appliance                       │
//! │  ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐  │
//! │  │  source  │───▶│  check   │───▶│   data   │───▶│  report  │  │
//! │  │ (loader) │    │(dispatch)│    │ (engine) │    │ (render) │  │
//! │  └──────────┘    └──────────┘    └──────────┘    └──────────┘  │
//! │       ▲                                                        │
//! │       └── FileSource | MemorySource                            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Loads the report markup into a typed
//!   [`Snapshot`](probe_types::Snapshot) ([`SnapshotSource`] trait)
//! - **[`check`]**: Resolves the requested check and dispatches it
//! - **[`data`]**: The evaluation engine - selection, projection through the
//!   per-type descriptor table, health classification, epoch skew
//! - **[`report`]**: Renders an [`Evaluation`] into plugin output
//!
//! The engine never prints or exits; fatal conditions come back as
//! [`ProbeError`] values and the binary turns them into `UNKNOWN` output.
//!
//! ## Usage
//!
//! ### As a monitoring plugin
//!
//! ```bash
//! check-appliance --xmlfile alerts.xml --appliance-check disks
//! check-appliance --xmlfile alerts.xml --enclosure-check fans
//! check-appliance --xmlfile alerts.xml --appliance-check epoch --warning 300 --critical 900
//! ```
//!
//! ### As a library
//!
//! ```
//! use appliance_probe::{Check, MemorySource, Report, Settings, SnapshotSource};
//!
//! let source = MemorySource::new(r#"
//!     <monitorResponse><computenode><epoch>1700000000</epoch>
//!       <components name="appliance"><component><fans>
//!         <fan><property name="Name" value="FAN1"/><property name="State" value="OK"/>
//!              <property name="Status" value="OK"/><property name="ErrorStatus" value="0"/></fan>
//!       </fans></component></components>
//!     </computenode></monitorResponse>"#);
//!
//! let snapshot = source.load().unwrap();
//! let check = Check::from_flags(Some("fans"), None).unwrap();
//! let evaluation = check.run(&snapshot, &Settings::default(), 1700000000.0).unwrap();
//!
//! let report = Report::render(&evaluation);
//! assert_eq!(report.exit_code, 0);
//! assert!(report.text.starts_with("OK: All 1 fans reported a state of OK | "));
//! ```

pub mod check;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use check::Check;
pub use config::Settings;
pub use data::{ComponentKind, Evaluation};
pub use error::ProbeError;
pub use report::{Export, Report};
pub use source::{FileSource, MemorySource, SnapshotSource};
