//! Filesystem capability used by the catalog for listing, renaming, and
//! deleting workspace directories.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use tracing::debug;

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: OsString,
    /// Symlinks are not followed; a link to a directory is not a directory.
    pub is_dir: bool,
}

pub trait WorkspaceFs {
    fn exists(&self, path: &Path) -> bool;

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Move `from` to `to`. Fails with `AlreadyExists` rather than replacing
    /// an existing target.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`WorkspaceFs`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl WorkspaceFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut items = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            items.push(DirEntryInfo {
                name: entry.file_name(),
                is_dir,
            });
        }
        // read_dir order is platform dependent
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if to.symlink_metadata().is_ok() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", to.display()),
            ));
        }
        debug!("Renaming {} -> {}", from.display(), to.display());
        std::fs::rename(from, to)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!("Removing {}", path.display());
        std::fs::remove_dir_all(path)
    }
}
