//! macOS host support.

use std::path::{Path, PathBuf};

use semver::Version;

use crate::core::version::EngineVersion;
use crate::platform::{newest_install, HostPlatform};

const INSTALL_ROOT: &str = "/Users/Shared/Epic Games";
const INSTALL_PREFIXES: &[&str] = &["UE_5.", "UE_4."];

/// Before this version `Build.sh` only accepts `macosx` as the platform.
const MAC_PLATFORM_RENAME: Version = Version::new(4, 22, 2);

#[derive(Debug, Clone, Copy, Default)]
pub struct Darwin;

impl HostPlatform for Darwin {
    fn identifier(&self) -> &'static str {
        "Mac"
    }

    fn detect_engine_root(&self) -> Option<PathBuf> {
        newest_install(Path::new(INSTALL_ROOT), INSTALL_PREFIXES)
    }

    fn build_script(&self, engine_root: &Path) -> PathBuf {
        engine_root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join("Mac")
            .join("Build.sh")
    }

    fn build_tool_platform(&self, platform: &str, version: &EngineVersion) -> String {
        if platform == self.identifier() && version.semver() < MAC_PLATFORM_RENAME {
            "macosx".to_string()
        } else {
            platform.to_string()
        }
    }
}
