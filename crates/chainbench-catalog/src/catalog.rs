//! The in-memory workspace catalog.

use std::path::{Path, PathBuf};

use chainbench_protocol::{Flavor, NamedWorkspace, WorkspaceDescriptor, WorkspaceResult};
use chainbench_services::Workspace;
use serde::Serialize;
use tracing::debug;

/// Every workspace known to the application, in discovery order followed by
/// the built-in defaults.
///
/// Built by a full scan; never patched in place. A rescan replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    root_directory: PathBuf,
    entries: Vec<WorkspaceDescriptor>,
}

impl Catalog {
    pub fn new(root_directory: impl Into<PathBuf>, entries: Vec<WorkspaceDescriptor>) -> Self {
        Self {
            root_directory: root_directory.into(),
            entries,
        }
    }

    /// A catalog with nothing in it, before the first scan.
    pub fn empty(root_directory: impl Into<PathBuf>) -> Self {
        Self::new(root_directory, Vec::new())
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    pub fn entries(&self) -> &[WorkspaceDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// User-created workspaces only, in catalog order.
    pub fn list_named(&self) -> Vec<NamedWorkspace> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry.name.as_ref().map(|name| NamedWorkspace {
                    name: name.clone(),
                    flavor: entry.flavor,
                })
            })
            .collect()
    }

    /// First entry with exactly this name (`None` selects a default) whose
    /// flavor matches `flavor`. Entries without a stored flavor match
    /// `Ethereum`.
    pub fn find(&self, name: Option<&str>, flavor: Flavor) -> Option<&WorkspaceDescriptor> {
        self.entries.iter().find(|entry| entry.matches(name, flavor))
    }

    /// Bootstrap every entry's runtime state, in catalog order.
    ///
    /// Stops at the first failure and returns it; nothing after the failing
    /// entry is touched.
    pub fn bootstrap_all(&self) -> WorkspaceResult<Vec<Workspace>> {
        let mut workspaces = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let mut workspace = Workspace::from_descriptor(entry);
            workspace.bootstrap()?;
            workspaces.push(workspace);
        }
        debug!("Bootstrapped {} workspaces", workspaces.len());
        Ok(workspaces)
    }
}
