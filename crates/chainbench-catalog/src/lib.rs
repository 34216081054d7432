//! Chainbench workspace catalog
//!
//! Discovers the workspaces persisted under `<root>/workspaces`, repairs
//! directories whose name drifted from their settings, drops stray copies of
//! default workspaces, and appends the built-in default per flavor.
//!
//! A scan runs in three steps: `survey` reads the disk, `plan` decides
//! what to rename, delete, and keep without touching anything, and `apply`
//! performs the changes. Failures while applying are reported as
//! [`ScanWarning`]s instead of aborting the scan.

pub mod builder;
pub mod catalog;
pub mod manager;
pub mod reconcile;
pub mod report;

pub use builder::{Survey, WorkspaceCatalogBuilder};
pub use catalog::Catalog;
pub use manager::{Startup, WorkspaceManager};
pub use reconcile::{Observation, ReconcilePlan, Rename, plan};
pub use report::{ScanReport, ScanWarning};
