//! Pure reconciliation: from what a survey saw to what the scan should do.

use std::path::{Path, PathBuf};

use chainbench_protocol::{Flavor, WorkspaceDescriptor};
use chainbench_services::Workspace;

use crate::report::ScanWarning;

/// What the survey found in one workspaces-directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Settings say `isDefault`; the directory does not belong here.
    StrayDefault { directory: PathBuf },
    /// A workspace as its settings describe it after bootstrap.
    Workspace {
        directory: PathBuf,
        name: Option<String>,
        flavor: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Everything a scan will do, decided before anything is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub deletions: Vec<PathBuf>,
    pub renames: Vec<Rename>,
    /// Discovered workspaces followed by one default per flavor.
    pub entries: Vec<WorkspaceDescriptor>,
    pub warnings: Vec<ScanWarning>,
}

/// Decide deletions, renames, and catalog entries for a set of observations.
///
/// Touches nothing. Defaults are appended unconditionally, even when a
/// discovered workspace already has the same flavor.
pub fn plan(root_directory: &Path, observations: Vec<Observation>) -> ReconcilePlan {
    let mut plan = ReconcilePlan {
        deletions: Vec::new(),
        renames: Vec::new(),
        entries: Vec::new(),
        warnings: Vec::new(),
    };

    for observation in observations {
        match observation {
            Observation::StrayDefault { directory } => plan.deletions.push(directory),
            Observation::Workspace {
                directory,
                name,
                flavor,
            } => {
                let Some(name) = name else {
                    plan.warnings.push(ScanWarning::MissingName { directory });
                    continue;
                };

                let parsed = flavor.as_deref().map(str::parse::<Flavor>).transpose();
                let flavor = match parsed {
                    Ok(parsed) => parsed,
                    Err(_) => {
                        plan.warnings.push(ScanWarning::UnknownFlavor {
                            directory,
                            flavor: flavor.unwrap_or_default(),
                        });
                        continue;
                    }
                };

                let Some(sanitized) = Workspace::directory_name(&name) else {
                    plan.warnings.push(ScanWarning::UnusableName { directory, name });
                    continue;
                };

                let current = directory.file_name().and_then(|n| n.to_str());
                if current != Some(sanitized.as_str()) {
                    plan.renames.push(Rename {
                        to: directory.with_file_name(&sanitized),
                        from: directory,
                    });
                }

                plan.entries.push(WorkspaceDescriptor::new(Some(name), root_directory, flavor));
            }
        }
    }

    plan.entries.extend(
        Flavor::ALL
            .iter()
            .map(|&flavor| WorkspaceDescriptor::default_for(root_directory, flavor)),
    );

    plan
}
