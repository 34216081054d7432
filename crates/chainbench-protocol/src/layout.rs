//! On-disk layout of the application data directory.
//!
//! ```text
//! <root>/
//!   default/                 Ethereum default workspace
//!   default_<flavor>/        other flavor defaults
//!   workspaces/
//!     <sanitized name>/
//!       Settings
//!       chaindata/
//! ```

use std::path::{Path, PathBuf};

use crate::flavor::Flavor;

pub struct Layout;

impl Layout {
    pub const WORKSPACES_DIR: &'static str = "workspaces";
    pub const CHAINDATA_DIR: &'static str = "chaindata";
    pub const SETTINGS_FILE: &'static str = "Settings";
    pub const DEFAULT_DIR: &'static str = "default";

    /// Directory names the OS drops into folders a user has browsed.
    /// Finder creates `.DS_Store` in the workspaces directory.
    pub const OS_ARTIFACTS: &'static [&'static str] = &[".DS_Store"];

    pub fn workspaces_dir(root: &Path) -> PathBuf {
        root.join(Self::WORKSPACES_DIR)
    }

    pub fn default_dir(root: &Path, flavor: Flavor) -> PathBuf {
        match flavor {
            Flavor::Ethereum => root.join(Self::DEFAULT_DIR),
            other => root.join(format!("{}_{}", Self::DEFAULT_DIR, other)),
        }
    }

    pub fn chaindata_dir(workspace_dir: &Path) -> PathBuf {
        workspace_dir.join(Self::CHAINDATA_DIR)
    }

    pub fn is_os_artifact(file_name: &str) -> bool {
        Self::OS_ARTIFACTS.contains(&file_name)
    }
}

/// Keys read from and written to a workspace's settings.
pub struct SettingKeys;

impl SettingKeys {
    pub const NAME: &'static str = "name";
    pub const FLAVOR: &'static str = "flavor";
    pub const IS_DEFAULT: &'static str = "isDefault";
    pub const UUID: &'static str = "uuid";
    pub const DB_PATH: &'static str = "db_path";
    pub const SERVER: &'static str = "server";
}
