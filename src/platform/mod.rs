//! Host platform collaborators.
//!
//! Each supported host knows how to find an installed engine, which build
//! script drives UBT, which UBT platform identifier to pass and which flag
//! convention its compilers use. Linux additionally ships a default library
//! set backed by a built-in override.

pub mod darwin;
pub mod linux;
pub mod windows;

use std::path::{Path, PathBuf};

use crate::core::convention::FlagConvention;
use crate::core::details::LibraryOverrides;
use crate::core::version::EngineVersion;

pub use darwin::Darwin;
pub use linux::Linux;
pub use windows::Windows;

/// Platform-specific behaviour needed to drive UBT.
pub trait HostPlatform {
    /// Platform identifier as understood by UnrealBuildTool.
    fn identifier(&self) -> &'static str;

    /// Prefix convention of the host compilers.
    fn convention(&self) -> FlagConvention {
        FlagConvention::posix()
    }

    /// Locate the newest installed engine, if any.
    fn detect_engine_root(&self) -> Option<PathBuf>;

    /// Script that invokes UnrealBuildTool.
    fn build_script(&self, engine_root: &Path) -> PathBuf;

    /// Platform name passed to the build script for `platform`.
    fn build_tool_platform(&self, platform: &str, _version: &EngineVersion) -> String {
        platform.to_string()
    }

    /// Libraries prepended to every query unless `--nodefaults` is given.
    fn default_libraries(&self) -> Vec<String> {
        Vec::new()
    }

    /// Built-in library overrides.
    fn library_overrides(&self, _version: &EngineVersion) -> LibraryOverrides {
        LibraryOverrides::new()
    }
}

/// Platform implementation for an OS name as in [`std::env::consts::OS`].
pub fn for_os(os: &str) -> Box<dyn HostPlatform> {
    match os {
        "windows" => Box::new(Windows::new()),
        "macos" => Box::new(Darwin),
        _ => Box::new(Linux),
    }
}

/// Platform implementation for the running host.
pub fn host() -> Box<dyn HostPlatform> {
    for_os(std::env::consts::OS)
}

/// Newest `<base>/<prefix><N>` install, trying prefixes in order.
///
/// Directories whose suffix is not a number are ignored.
pub fn newest_install(base: &Path, prefixes: &[&str]) -> Option<PathBuf> {
    for prefix in prefixes {
        let pattern = base.join(format!("{}*", prefix));
        let Ok(entries) = glob::glob(&pattern.to_string_lossy()) else {
            continue;
        };

        let newest = entries
            .filter_map(Result::ok)
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                let minor = path
                    .file_name()?
                    .to_str()?
                    .strip_prefix(prefix)?
                    .parse::<u32>()
                    .ok()?;
                Some((minor, path))
            })
            .max_by_key(|(minor, _)| *minor);

        if let Some((_, path)) = newest {
            return Some(path);
        }
    }

    None
}
