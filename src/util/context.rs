//! Global context for ue4cli operations.
//!
//! Provides centralized access to the configuration directory, the cache
//! location and the environment toggles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::cache::JsonFileCache;
use crate::util::config::Config;

/// Overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "UE4CLI_CONFIG_DIR";

/// Set to `1` to hide `InstalledBuild.txt` while UBT runs.
pub const SENTINEL_RENAME_ENV: &str = "UE4CLI_SENTINEL_RENAME";

/// Set to `1` for debug logging.
pub const VERBOSE_ENV: &str = "UE4CLI_VERBOSE";

/// Whether an environment toggle is set to `1`.
pub fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Directory holding `config.toml` and the cache
    config_dir: PathBuf,

    /// Whether to rename the installed-build sentinel during exports
    sentinel_rename: bool,
}

impl GlobalContext {
    /// Create a context from the environment.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("ue4cli"))
                .context("failed to determine the user configuration directory")?,
        };

        Ok(GlobalContext {
            config_dir,
            sentinel_rename: env_flag(SENTINEL_RENAME_ENV),
        })
    }

    /// Create a context rooted at a specific configuration directory.
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        GlobalContext {
            config_dir: config_dir.into(),
            sentinel_rename: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_sentinel_rename(&mut self, enabled: bool) {
        self.sentinel_rename = enabled;
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the user configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Directory holding the per-engine-version cache files.
    pub fn cache_dir(&self) -> PathBuf {
        self.config_dir.join("cache")
    }

    /// File-backed cache in [`GlobalContext::cache_dir`].
    pub fn cache(&self) -> JsonFileCache {
        JsonFileCache::new(self.cache_dir())
    }

    /// Load the user configuration, defaulting when absent or unreadable.
    pub fn config(&self) -> Config {
        Config::load_or_default(&self.config_path())
    }

    /// Load the user configuration for modification, failing when unreadable.
    pub fn config_for_update(&self) -> Result<Config> {
        Config::load_for_update(&self.config_path())
    }

    pub fn sentinel_rename(&self) -> bool {
        self.sentinel_rename
    }
}
