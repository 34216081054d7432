//! Chainbench collaborators
//!
//! The pieces the catalog consumes through narrow interfaces: a per-directory
//! settings store, a filesystem capability, and the workspace entity that
//! knows its own directory layout and how to bootstrap itself.

pub mod fs;
pub mod settings;
pub mod workspace;

use std::path::Path;

use chainbench_protocol::WorkspaceResult;
use serde_json::Value;

pub use fs::{DirEntryInfo, LocalFs, WorkspaceFs};
pub use settings::{JsonSettings, JsonSettingsStore};
pub use workspace::Workspace;

/// Key-value settings persisted alongside a workspace directory.
///
/// Keys may be dotted paths into nested objects (`server.port`).
pub trait SettingsStore {
    /// The workspace directory this store is rooted at.
    fn directory(&self) -> &Path;

    fn get(&self, key: &str) -> Option<Value>;

    /// Create or repair the settings file. Idempotent.
    fn bootstrap(&mut self) -> WorkspaceResult<()>;

    fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Only a literal `true` counts.
    fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }
}

/// Opens a [`SettingsStore`] for a workspace directory.
pub trait SettingsProvider {
    type Store: SettingsStore;

    /// `chaindata` is where the workspace persists chain state.
    fn open(&self, directory: &Path, chaindata: &Path) -> WorkspaceResult<Self::Store>;
}
