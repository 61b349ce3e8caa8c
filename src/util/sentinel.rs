//! Temporary renaming of the installed-build sentinel file.
//!
//! Installed builds of the engine ship only a handful of third-party
//! libraries. When the full `ThirdParty` directory of a source build has
//! been copied in, hiding `Engine/Build/InstalledBuild.txt` for the duration
//! of the export lets UBT report every library.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::rename;

/// Location of the installed-build sentinel below an engine root.
pub fn sentinel_file(engine_root: &Path) -> PathBuf {
    engine_root
        .join("Engine")
        .join("Build")
        .join("InstalledBuild.txt")
}

/// A sentinel file moved aside until [`SentinelRename::release`] or drop.
#[derive(Debug)]
pub struct SentinelRename {
    original: PathBuf,
    backup: PathBuf,
    released: bool,
}

impl SentinelRename {
    /// Move `path` to `<path>.bak`. Fails if the rename fails.
    pub fn acquire(path: &Path) -> Result<Self> {
        let mut backup = path.as_os_str().to_owned();
        backup.push(".bak");
        let backup = PathBuf::from(backup);

        rename(path, &backup)?;
        tracing::debug!("Renamed sentinel file {}", path.display());

        Ok(SentinelRename {
            original: path.to_path_buf(),
            backup,
            released: false,
        })
    }

    /// Move the sentinel back. Not retried on failure.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        rename(&self.backup, &self.original)
    }
}

impl Drop for SentinelRename {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = rename(&self.backup, &self.original) {
                tracing::error!("{:#}", e);
            }
        }
    }
}
