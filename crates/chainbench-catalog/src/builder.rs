//! WorkspaceCatalogBuilder — scans the workspaces directory into a catalog.

use std::path::Path;

use chainbench_protocol::{Layout, SettingKeys, WorkspaceError, WorkspaceResult};
use chainbench_services::{
    JsonSettings, LocalFs, SettingsProvider, SettingsStore, WorkspaceFs,
};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::reconcile::{Observation, ReconcilePlan, plan};
use crate::report::{ScanReport, ScanWarning};

/// Result of [`WorkspaceCatalogBuilder::survey`].
#[derive(Debug, Clone, Default)]
pub struct Survey {
    pub observations: Vec<Observation>,
    pub warnings: Vec<ScanWarning>,
}

/// Builds a [`Catalog`] from `<root>/workspaces`.
///
/// Filesystem access goes through `F` and settings through `S`, so the
/// reconciliation can run against an in-memory disk.
pub struct WorkspaceCatalogBuilder<F = LocalFs, S = JsonSettings> {
    fs: F,
    settings: S,
}

impl WorkspaceCatalogBuilder {
    /// Builder over the local disk and JSON settings files.
    pub fn local() -> Self {
        Self::new(LocalFs, JsonSettings)
    }
}

impl Default for WorkspaceCatalogBuilder {
    fn default() -> Self {
        Self::local()
    }
}

impl<F: WorkspaceFs, S: SettingsProvider> WorkspaceCatalogBuilder<F, S> {
    pub fn new(fs: F, settings: S) -> Self {
        Self { fs, settings }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Scan, reconcile, and return the catalog.
    ///
    /// Only failing to list an existing workspaces directory is an error.
    /// Unusable settings, rename failures, and delete failures end up in
    /// [`ScanReport::warnings`] and the affected entry is left out or kept
    /// where it is.
    pub fn scan(&self, root_directory: &Path) -> WorkspaceResult<ScanReport> {
        let survey = self.survey(root_directory)?;
        let mut plan = plan(root_directory, survey.observations);

        let mut warnings = survey.warnings;
        warnings.append(&mut plan.warnings);

        let mut report = self.apply(root_directory, plan);
        warnings.append(&mut report.warnings);
        report.warnings = warnings;

        info!(
            "Scanned {}: {} workspaces ({} warnings)",
            root_directory.display(),
            report.catalog.len(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// Read every entry of the workspaces directory and describe it.
    ///
    /// Non-directories and OS artifacts are skipped. Non-default entries get
    /// their settings bootstrapped before `name` and `flavor` are read; an
    /// entry whose settings cannot be opened or bootstrapped is skipped with
    /// a warning.
    pub fn survey(&self, root_directory: &Path) -> WorkspaceResult<Survey> {
        let workspaces_dir = Layout::workspaces_dir(root_directory);
        let mut survey = Survey::default();

        if !self.fs.exists(&workspaces_dir) {
            debug!("No workspaces directory at {}", workspaces_dir.display());
            return Ok(survey);
        }

        let entries = self
            .fs
            .read_dir(&workspaces_dir)
            .map_err(|e| WorkspaceError::io(&workspaces_dir, e))?;

        for entry in entries {
            let directory = workspaces_dir.join(&entry.name);
            if !entry.is_dir {
                debug!("Skipping non-directory {}", directory.display());
                continue;
            }

            let Some(file_name) = entry.name.to_str() else {
                warn!("Skipping {}: name is not valid UTF-8", directory.display());
                survey.warnings.push(ScanWarning::NonUtf8Directory { path: directory });
                continue;
            };
            if Layout::is_os_artifact(file_name) {
                debug!("Skipping OS artifact {}", directory.display());
                continue;
            }

            let chaindata = Layout::chaindata_dir(&directory);
            let mut store = match self.settings.open(&directory, &chaindata) {
                Ok(store) => store,
                Err(e) => {
                    warn!("Skipping {}: cannot open settings: {e}", directory.display());
                    survey.warnings.push(ScanWarning::SettingsUnavailable {
                        directory,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if store.get_bool(SettingKeys::IS_DEFAULT) {
                survey.observations.push(Observation::StrayDefault {
                    directory: store.directory().to_path_buf(),
                });
                continue;
            }

            if let Err(e) = store.bootstrap() {
                warn!("Skipping {}: cannot bootstrap settings: {e}", directory.display());
                survey.warnings.push(ScanWarning::SettingsUnavailable {
                    directory,
                    reason: e.to_string(),
                });
                continue;
            }
            survey.observations.push(Observation::Workspace {
                directory,
                name: store.get_str(SettingKeys::NAME),
                flavor: store.get_str(SettingKeys::FLAVOR),
            });
        }

        Ok(survey)
    }

    /// Perform a plan's deletions, then its renames. Never fails; each
    /// failure becomes a warning and the scan carries on.
    pub fn apply(&self, root_directory: &Path, plan: ReconcilePlan) -> ScanReport {
        let mut warnings = plan.warnings;

        for directory in plan.deletions {
            match self.fs.remove_dir_all(&directory) {
                Ok(()) => info!("Removed stray default workspace {}", directory.display()),
                Err(e) => {
                    warn!("Failed to remove {}: {e}", directory.display());
                    warnings.push(ScanWarning::DeleteFailed {
                        directory,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Two names sanitizing to the same directory collide here; the loser
        // stays where it is.
        for rename in plan.renames {
            match self.fs.rename(&rename.from, &rename.to) {
                Ok(()) => info!(
                    "Renamed workspace directory {} -> {}",
                    rename.from.display(),
                    rename.to.display()
                ),
                Err(e) => {
                    warn!(
                        "Failed to rename {} -> {}: {e}",
                        rename.from.display(),
                        rename.to.display()
                    );
                    warnings.push(ScanWarning::RenameFailed {
                        from: rename.from,
                        to: rename.to,
                        reason: e.to_string(),
                    });
                }
            }
        }

        ScanReport {
            catalog: Catalog::new(root_directory, plan.entries),
            warnings,
        }
    }
}
