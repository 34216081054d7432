//! Workspace entity — directory layout, name sanitizing, and bootstrap.

use std::path::{Path, PathBuf};

use chainbench_protocol::{
    Flavor, Layout, SettingKeys, WorkspaceDescriptor, WorkspaceError, WorkspaceResult,
};
use serde_json::json;
use tracing::info;

use crate::settings::JsonSettingsStore;
use crate::SettingsStore;

/// A workspace and the runtime state it owns on disk.
///
/// Named workspaces live under `<root>/workspaces/<sanitized name>`; the
/// unnamed default for each flavor lives directly under the root.
#[derive(Debug)]
pub struct Workspace {
    name: Option<String>,
    root_directory: PathBuf,
    flavor: Option<Flavor>,
    directory: PathBuf,
    settings: Option<JsonSettingsStore>,
}

impl Workspace {
    pub fn new(name: Option<String>, root_directory: impl Into<PathBuf>, flavor: Option<Flavor>) -> Self {
        let root_directory = root_directory.into();
        let directory = match &name {
            Some(name) => Layout::workspaces_dir(&root_directory).join(Self::sanitized_name(name)),
            None => Layout::default_dir(&root_directory, flavor.unwrap_or_default()),
        };

        Self {
            name,
            root_directory,
            flavor,
            directory,
            settings: None,
        }
    }

    pub fn from_descriptor(descriptor: &WorkspaceDescriptor) -> Self {
        Self::new(
            descriptor.name.clone(),
            descriptor.root_directory.clone(),
            descriptor.flavor,
        )
    }

    /// Filesystem-safe form of a workspace name, used as its directory name.
    ///
    /// Whitespace becomes `-`; anything other than ASCII alphanumerics,
    /// `-`, `_` and `.` is dropped.
    pub fn sanitized_name(name: &str) -> String {
        name.chars()
            .filter_map(|c| {
                if c.is_whitespace() {
                    Some('-')
                } else if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    Some(c)
                } else {
                    None
                }
            })
            .collect()
    }

    /// The sanitized name if it can stand as a directory name on its own.
    pub fn directory_name(name: &str) -> Option<String> {
        let sanitized = Self::sanitized_name(name);
        match sanitized.as_str() {
            "" | "." | ".." => None,
            _ => Some(sanitized),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn flavor(&self) -> Option<Flavor> {
        self.flavor
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn chaindata_directory(&self) -> PathBuf {
        Layout::chaindata_dir(&self.directory)
    }

    pub fn is_default(&self) -> bool {
        self.name.is_none()
    }

    /// Settings loaded by [`bootstrap`](Self::bootstrap); `None` before it.
    pub fn settings(&self) -> Option<&JsonSettingsStore> {
        self.settings.as_ref()
    }

    /// Create or repair this workspace's directory and settings.
    pub fn bootstrap(&mut self) -> WorkspaceResult<()> {
        if let Some(name) = &self.name {
            if Self::directory_name(name).is_none() {
                return Err(WorkspaceError::bootstrap(
                    name.clone(),
                    "name has no filesystem-safe characters",
                ));
            }
        }

        let mut settings = JsonSettingsStore::open(&self.directory, &self.chaindata_directory())?;
        // Record our flavor before bootstrap fills in the Ethereum default.
        if let Some(flavor) = self.flavor {
            if settings.get_str(SettingKeys::FLAVOR).is_none() {
                settings.set(SettingKeys::FLAVOR, json!(flavor.as_str()));
            }
        }
        settings.bootstrap()?;

        match &self.name {
            None => {
                let flavor = self.flavor.unwrap_or_default();
                settings.set(SettingKeys::IS_DEFAULT, json!(true));
                settings.set(SettingKeys::FLAVOR, json!(flavor.as_str()));
            }
            Some(name) => {
                if settings.get_str(SettingKeys::NAME).is_none() {
                    settings.set(SettingKeys::NAME, json!(name));
                }
            }
        }
        settings.save()?;

        info!(
            "Workspace ready: {} ({})",
            self.name.as_deref().unwrap_or("default"),
            self.directory.display()
        );
        self.settings = Some(settings);
        Ok(())
    }
}
