//! Windows host support.

use std::path::{Path, PathBuf};

use crate::core::convention::FlagConvention;
use crate::platform::{newest_install, HostPlatform};

const INSTALL_PREFIXES: &[&str] = &["UE_5.", "UE_4."];

#[derive(Debug, Clone)]
pub struct Windows {
    arch: String,
}

impl Windows {
    pub fn new() -> Self {
        Self::with_arch(std::env::consts::ARCH)
    }

    pub fn with_arch(arch: impl Into<String>) -> Self {
        Windows { arch: arch.into() }
    }
}

impl Default for Windows {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPlatform for Windows {
    fn identifier(&self) -> &'static str {
        if self.arch.ends_with("64") {
            "Win64"
        } else {
            "Win32"
        }
    }

    fn convention(&self) -> FlagConvention {
        FlagConvention::msvc()
    }

    fn detect_engine_root(&self) -> Option<PathBuf> {
        let program_files = std::env::var_os("PROGRAMFILES")?;
        newest_install(
            &PathBuf::from(program_files).join("Epic Games"),
            INSTALL_PREFIXES,
        )
    }

    fn build_script(&self, engine_root: &Path) -> PathBuf {
        engine_root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join("Build.bat")
    }
}
