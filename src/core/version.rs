//! Installed engine version.
//!
//! The engine records its version in `Engine/Build/Build.version`. Besides
//! the numbers themselves we keep the raw document around so that a stable
//! hash can key the per-version cache.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use thiserror::Error;

use crate::util::hash::json_digest;

/// Version details of an installed engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// `CompatibleChangelist` when present, otherwise `Changelist`.
    pub changelist: u64,
    raw: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BuildVersionFile {
    major_version: u64,
    minor_version: u64,
    patch_version: u64,
    #[serde(default)]
    changelist: Option<u64>,
    #[serde(default)]
    compatible_changelist: Option<u64>,
}

impl EngineVersion {
    /// Create a version from its components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let raw = serde_json::json!({
            "MajorVersion": major,
            "MinorVersion": minor,
            "PatchVersion": patch,
        });
        EngineVersion {
            major,
            minor,
            patch,
            changelist: 0,
            raw,
        }
    }

    /// Parse the contents of a `Build.version` file.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let raw: serde_json::Value = serde_json::from_str(contents)?;
        let file: BuildVersionFile = serde_json::from_value(raw.clone())?;

        Ok(EngineVersion {
            major: file.major_version,
            minor: file.minor_version,
            patch: file.patch_version,
            changelist: file
                .compatible_changelist
                .or(file.changelist)
                .unwrap_or_default(),
            raw,
        })
    }

    /// Load the version file of the engine installed at `engine_root`.
    pub fn load(engine_root: &Path) -> Result<Self> {
        let path = version_file(engine_root);
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read engine version file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse engine version file: {}", path.display()))
    }

    /// The version as a semver value, for range comparisons.
    pub fn semver(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    /// Stable identifier for this exact engine version.
    ///
    /// SHA-256 of the version document serialized with sorted keys.
    pub fn hash(&self) -> String {
        json_digest(&self.raw)
    }

    /// Render the version in the requested format.
    pub fn format(&self, format: VersionFormat) -> String {
        match format {
            VersionFormat::Major => self.major.to_string(),
            VersionFormat::Minor => self.minor.to_string(),
            VersionFormat::Patch => self.patch.to_string(),
            VersionFormat::Full => format!("{}.{}.{}", self.major, self.minor, self.patch),
            VersionFormat::Short => format!("{}.{}", self.major, self.minor),
        }
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Location of the version file below an engine root.
pub fn version_file(engine_root: &Path) -> std::path::PathBuf {
    engine_root.join("Engine").join("Build").join("Build.version")
}

/// Output format for `ue4 version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionFormat {
    Major,
    Minor,
    Patch,
    #[default]
    Full,
    Short,
}

impl VersionFormat {
    /// Every accepted format name.
    pub const NAMES: [&'static str; 5] = ["major", "minor", "patch", "full", "short"];
}

/// Requested version format is not one we know.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised version output format `{format}` (expected one of: {})", VersionFormat::NAMES.join(", "))]
pub struct VersionFormatError {
    pub format: String,
}

impl FromStr for VersionFormat {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(VersionFormat::Major),
            "minor" => Ok(VersionFormat::Minor),
            "patch" => Ok(VersionFormat::Patch),
            "full" => Ok(VersionFormat::Full),
            "short" => Ok(VersionFormat::Short),
            _ => Err(VersionFormatError {
                format: s.to_string(),
            }),
        }
    }
}
