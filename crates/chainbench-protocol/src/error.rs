//! Error type shared by the settings store, workspace entity, and catalog.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file {} is not valid JSON: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to bootstrap workspace {name}: {reason}")]
    Bootstrap { name: String, reason: String },

    #[error("Unknown flavor: {0}")]
    InvalidFlavor(String),
}

impl WorkspaceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn bootstrap(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Bootstrap {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
