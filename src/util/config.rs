//! Configuration file support.
//!
//! The user configuration lives at `<config dir>/config.toml`:
//!
//! ```toml
//! [engine]
//! root = "/opt/UnrealEngine"
//!
//! [libraries.mylib]
//! include_dirs = ["%UE4_ROOT%/Engine/Source/ThirdParty/mylib/include"]
//! libs = ["%UE4_ROOT%/Engine/Source/ThirdParty/mylib/lib/libmylib.a"]
//! ```
//!
//! Library entries are served in place of UBT data for that name and replace
//! any built-in platform override of the same name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::convention::FlagConvention;
use crate::core::details::{LibraryDetails, LibraryOverrides};

/// User configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings
    pub engine: EngineConfig,

    /// Per-library overrides, keyed by library name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub libraries: BTreeMap<String, LibraryConfig>,
}

/// Engine-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine root override (takes precedence over auto-detection)
    pub root: Option<PathBuf>,
}

/// A user-defined library override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prefix_dirs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_dirs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub link_dirs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cxx_flags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ld_flags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cmake_flags: Vec<String>,
}

impl LibraryConfig {
    /// Convert to [`LibraryDetails`] for the given flag convention.
    pub fn to_details(&self, convention: FlagConvention) -> LibraryDetails {
        LibraryDetails::new(convention)
            .with_prefix_dirs(self.prefix_dirs.iter().cloned())
            .with_include_dirs(self.include_dirs.iter().cloned())
            .with_link_dirs(self.link_dirs.iter().cloned())
            .with_libs(self.libs.iter().cloned())
            .with_system_libs(self.system_libs.iter().cloned())
            .with_definitions(self.definitions.iter().cloned())
            .with_cxx_flags(self.cxx_flags.iter().cloned())
            .with_ld_flags(self.ld_flags.iter().cloned())
            .with_cmake_flags(self.cmake_flags.iter().cloned())
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration that is about to be rewritten.
    ///
    /// A missing file yields defaults, but an unparseable one is an error so
    /// that saving cannot discard the user's entries.
    pub fn load_for_update(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }

    /// The user's library overrides as [`LibraryDetails`].
    pub fn library_overrides(&self, convention: FlagConvention) -> LibraryOverrides {
        self.libraries
            .iter()
            .map(|(name, lib)| (name.clone(), lib.to_details(convention)))
            .collect()
    }
}
