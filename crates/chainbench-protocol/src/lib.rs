//! Chainbench protocol types
//!
//! Shared vocabulary for the workspace catalog: simulation flavors,
//! workspace descriptors, the on-disk layout, and the error type every
//! other crate reports through.

pub mod descriptor;
pub mod error;
pub mod flavor;
pub mod layout;

pub use descriptor::{NamedWorkspace, WorkspaceDescriptor};
pub use error::{WorkspaceError, WorkspaceResult};
pub use flavor::{Flavor, is_flavor};
pub use layout::{Layout, SettingKeys};
