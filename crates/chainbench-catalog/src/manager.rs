//! WorkspaceManager — the application's shared handle on the catalog.

use std::path::{Path, PathBuf};

use chainbench_protocol::{Flavor, NamedWorkspace, WorkspaceDescriptor, WorkspaceResult};
use chainbench_services::{JsonSettings, LocalFs, SettingsProvider, Workspace, WorkspaceFs};
use parking_lot::RwLock;
use tracing::info;

use crate::builder::WorkspaceCatalogBuilder;
use crate::catalog::Catalog;
use crate::report::ScanWarning;

/// Outcome of [`WorkspaceManager::bootstrap`].
#[derive(Debug)]
pub struct Startup {
    pub workspaces: Vec<Workspace>,
    pub warnings: Vec<ScanWarning>,
}

/// Owns the data directory and the current catalog.
///
/// Uses parking_lot::RwLock so lookups can run while holding `&self` from
/// anywhere in the application. A rescan swaps the whole catalog.
pub struct WorkspaceManager<F = LocalFs, S = JsonSettings> {
    directory: PathBuf,
    builder: WorkspaceCatalogBuilder<F, S>,
    catalog: RwLock<Catalog>,
}

impl WorkspaceManager {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_builder(directory, WorkspaceCatalogBuilder::local())
    }
}

impl<F: WorkspaceFs, S: SettingsProvider> WorkspaceManager<F, S> {
    pub fn with_builder(directory: impl Into<PathBuf>, builder: WorkspaceCatalogBuilder<F, S>) -> Self {
        let directory = directory.into();
        Self {
            catalog: RwLock::new(Catalog::empty(&directory)),
            directory,
            builder,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Rescan the data directory and replace the catalog.
    pub fn enumerate(&self) -> WorkspaceResult<Vec<ScanWarning>> {
        let report = self.builder.scan(&self.directory)?;
        *self.catalog.write() = report.catalog;
        Ok(report.warnings)
    }

    /// Rescan, then bootstrap every workspace. The first bootstrap error
    /// aborts and is returned.
    pub fn bootstrap(&self) -> WorkspaceResult<Startup> {
        let warnings = self.enumerate()?;
        let workspaces = self.catalog.read().bootstrap_all()?;
        info!(
            "Startup complete: {} workspaces in {}",
            workspaces.len(),
            self.directory.display()
        );
        Ok(Startup {
            workspaces,
            warnings,
        })
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Catalog {
        self.catalog.read().clone()
    }

    pub fn non_default_names(&self) -> Vec<NamedWorkspace> {
        self.catalog.read().list_named()
    }

    pub fn get(&self, name: Option<&str>, flavor: Flavor) -> Option<WorkspaceDescriptor> {
        self.catalog.read().find(name, flavor).cloned()
    }
}
