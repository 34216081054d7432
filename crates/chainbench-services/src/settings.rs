//! JSON settings file stored at `<workspace>/Settings`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chainbench_protocol::{Layout, SettingKeys, WorkspaceError, WorkspaceResult};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::{SettingsProvider, SettingsStore};

/// Settings for one workspace directory, held in memory until saved.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    directory: PathBuf,
    chaindata_directory: PathBuf,
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// Load the settings file under `directory`, if there is one.
    ///
    /// A missing file yields an empty store. A file that is not a JSON object
    /// is logged and treated as empty so that `bootstrap` can rewrite it.
    pub fn open(directory: &Path, chaindata_directory: &Path) -> WorkspaceResult<Self> {
        let path = directory.join(Layout::SETTINGS_FILE);
        let values = match read_settings_file(&path) {
            Ok(values) => values.unwrap_or_default(),
            Err(e @ WorkspaceError::SettingsParse { .. }) => {
                warn!("{e}; settings will be reset on bootstrap");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            directory: directory.to_path_buf(),
            chaindata_directory: chaindata_directory.to_path_buf(),
            path,
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn chaindata_directory(&self) -> &Path {
        &self.chaindata_directory
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Set a (possibly dotted) key, creating intermediate objects as needed.
    /// Not persisted until [`save`](Self::save).
    pub fn set(&mut self, key: &str, value: Value) {
        let path: Vec<&str> = key.split('.').collect();
        set_path(&mut self.values, &path, value);
    }

    pub fn save(&self) -> WorkspaceResult<()> {
        let content = serde_json::to_string_pretty(&self.values).map_err(|source| {
            WorkspaceError::SettingsParse {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(|e| WorkspaceError::io(&self.path, e))
    }
}

impl SettingsStore for JsonSettingsStore {
    fn directory(&self) -> &Path {
        &self.directory
    }

    fn get(&self, key: &str) -> Option<Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.values.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current.clone())
    }

    fn bootstrap(&mut self) -> WorkspaceResult<()> {
        std::fs::create_dir_all(&self.directory)
            .map_err(|e| WorkspaceError::io(&self.directory, e))?;
        std::fs::create_dir_all(&self.chaindata_directory)
            .map_err(|e| WorkspaceError::io(&self.chaindata_directory, e))?;

        merge_missing(&mut self.values, default_settings(&self.chaindata_directory));
        if !matches!(self.values.get(SettingKeys::UUID), Some(Value::String(_))) {
            self.values.insert(
                SettingKeys::UUID.into(),
                json!(uuid::Uuid::new_v4().to_string()),
            );
        }

        self.save()?;
        debug!("Bootstrapped settings at {}", self.path.display());
        Ok(())
    }
}

/// Opens [`JsonSettingsStore`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSettings;

impl SettingsProvider for JsonSettings {
    type Store = JsonSettingsStore;

    fn open(&self, directory: &Path, chaindata: &Path) -> WorkspaceResult<JsonSettingsStore> {
        JsonSettingsStore::open(directory, chaindata)
    }
}

fn read_settings_file(path: &Path) -> WorkspaceResult<Option<Map<String, Value>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(WorkspaceError::io(path, e)),
    };

    let parsed: Value =
        serde_json::from_str(&content).map_err(|source| WorkspaceError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;

    match parsed {
        Value::Object(map) => Ok(Some(map)),
        // A valid document that is not an object is as unusable as a broken one.
        other => Err(WorkspaceError::SettingsParse {
            path: path.to_path_buf(),
            source: serde::de::Error::custom(format!("expected an object, found {other}")),
        }),
    }
}

fn set_path(map: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(nested) = slot {
                set_path(nested, rest, value);
            }
        }
    }
}

/// Copy every key of `defaults` missing from `target`, recursing into objects
/// present on both sides. Existing values always win.
fn merge_missing(target: &mut Map<String, Value>, defaults: Map<String, Value>) {
    for (key, default) in defaults {
        match target.get_mut(&key) {
            None => {
                target.insert(key, default);
            }
            Some(Value::Object(existing)) => {
                if let Value::Object(nested) = default {
                    merge_missing(existing, nested);
                }
            }
            Some(_) => {}
        }
    }
}

fn default_settings(chaindata: &Path) -> Map<String, Value> {
    let mut s = Map::new();
    s.insert(SettingKeys::IS_DEFAULT.into(), json!(false));
    s.insert(SettingKeys::FLAVOR.into(), json!("ethereum"));
    s.insert(SettingKeys::DB_PATH.into(), json!(chaindata.to_string_lossy()));
    s.insert(
        SettingKeys::SERVER.into(),
        json!({
            "hostname": "127.0.0.1",
            "port": 7545,
            "network_id": 5777,
            "default_balance_ether": 100,
            "total_accounts": 10,
        }),
    );
    s
}
