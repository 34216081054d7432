//! Workspace descriptors as held by the catalog.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::flavor::{Flavor, is_flavor};

/// One catalog entry.
///
/// A descriptor without a name is the virtual default workspace for its
/// flavor; it is never read from or written to the workspaces directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDescriptor {
    pub name: Option<String>,
    /// Application data directory shared by every descriptor.
    pub root_directory: PathBuf,
    /// Absent only in legacy settings; treated as Ethereum when matching.
    pub flavor: Option<Flavor>,
}

impl WorkspaceDescriptor {
    pub fn new(name: Option<String>, root_directory: impl Into<PathBuf>, flavor: Option<Flavor>) -> Self {
        Self {
            name,
            root_directory: root_directory.into(),
            flavor,
        }
    }

    /// The always-present default workspace for `flavor`.
    pub fn default_for(root_directory: &Path, flavor: Flavor) -> Self {
        Self::new(None, root_directory, Some(flavor))
    }

    pub fn is_default(&self) -> bool {
        self.name.is_none()
    }

    /// Exact name match (an absent name only matches an absent name) plus
    /// the legacy flavor rule.
    pub fn matches(&self, name: Option<&str>, flavor: Flavor) -> bool {
        self.name.as_deref() == name && is_flavor(self.flavor, flavor)
    }
}

/// A user-created workspace as presented next to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedWorkspace {
    pub name: String,
    pub flavor: Option<Flavor>,
}
