//! Scan results and the non-fatal problems met along the way.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Catalog;

/// Something a scan worked around. The affected entry was skipped or kept
/// under its original directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanWarning {
    #[error("Skipped {}: directory name is not valid UTF-8", path.display())]
    NonUtf8Directory { path: PathBuf },

    #[error("Skipped {}: settings unavailable: {reason}", directory.display())]
    SettingsUnavailable { directory: PathBuf, reason: String },

    #[error("Skipped {}: settings have no workspace name", directory.display())]
    MissingName { directory: PathBuf },

    #[error("Skipped {}: name {name:?} has no filesystem-safe characters", directory.display())]
    UnusableName { directory: PathBuf, name: String },

    #[error("Skipped {}: unknown flavor {flavor:?}", directory.display())]
    UnknownFlavor { directory: PathBuf, flavor: String },

    #[error("Could not delete stray default workspace {}: {reason}", directory.display())]
    DeleteFailed { directory: PathBuf, reason: String },

    #[error("Could not rename {} to {}: {reason}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },
}

/// The catalog produced by a scan, plus everything that went wrong softly.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub catalog: Catalog,
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
