//! Linux host support.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::core::convention::FlagConvention;
use crate::core::details::{LibraryDetails, LibraryOverrides, ROOT_PLACEHOLDER};
use crate::core::version::EngineVersion;
use crate::platform::HostPlatform;
use crate::util::process::find_executable;

/// Name of the bundled C++ runtime library.
pub const LIBCXX: &str = "libc++";

/// Editor binaries searched for on `PATH`, newest naming first.
const EDITOR_BINARIES: &[&str] = &["UnrealEditor", "UE4Editor"];

/// Desktop launchers written by the engine's desktop integration.
const LAUNCHERS: &[&str] = &[
    "UnrealEditor.desktop",
    "com.epicgames.UnrealEngineEditor.desktop",
    "UE4.desktop",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Linux;

/// Engine root for an editor binary directory (`Engine/Binaries/Linux`).
fn root_from_binaries_dir(dir: &Path) -> Option<PathBuf> {
    let dir = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    dir.ancestors().nth(3).map(Path::to_path_buf)
}

/// Extract the `Path=` entry of a desktop launcher.
pub fn launcher_path(contents: &str) -> Option<PathBuf> {
    let re = Regex::new(r"Path=(.*)\n").ok()?;
    re.captures(contents)
        .and_then(|caps| caps.get(1))
        .map(|m| PathBuf::from(m.as_str().trim_end_matches('\r')))
}

/// Override for the engine's bundled libc++.
///
/// Engines from 5.0 keep it under `ThirdParty/Unix`, older ones under
/// `ThirdParty/Linux`.
pub fn libcxx_override(version: &EngineVersion) -> LibraryDetails {
    let os_type = if version.major >= 5 { "Unix" } else { "Linux" };
    let root = format!(
        "{}/Engine/Source/ThirdParty/{}/LibCxx",
        ROOT_PLACEHOLDER, os_type
    );
    let lib_dir = format!("{}/lib/{}/x86_64-unknown-linux-gnu", root, os_type);

    LibraryDetails::new(FlagConvention::posix())
        .with_include_dirs([format!("{}/include", root), format!("{}/include/c++/v1", root)])
        .with_link_dirs([lib_dir.clone()])
        .with_libs([format!("{}/libc++.a", lib_dir), format!("{}/libc++abi.a", lib_dir)])
        .with_system_libs(["m", "c", "gcc_s", "gcc"])
        .with_cxx_flags(["-fPIC", "-nostdinc++"])
        .with_ld_flags(["-nodefaultlibs"])
}

impl HostPlatform for Linux {
    fn identifier(&self) -> &'static str {
        "Linux"
    }

    fn detect_engine_root(&self) -> Option<PathBuf> {
        for binary in EDITOR_BINARIES {
            if let Some(editor) = find_executable(binary) {
                let editor = std::fs::canonicalize(&editor).unwrap_or(editor);
                if let Some(root) = editor.parent().and_then(root_from_binaries_dir) {
                    return Some(root);
                }
            }
        }

        let applications = directories::BaseDirs::new()?
            .home_dir()
            .join(".local")
            .join("share")
            .join("applications");
        for launcher in LAUNCHERS {
            let Ok(contents) = std::fs::read_to_string(applications.join(launcher)) else {
                continue;
            };
            if let Some(root) = launcher_path(&contents).and_then(|p| root_from_binaries_dir(&p)) {
                return Some(root);
            }
        }

        None
    }

    fn build_script(&self, engine_root: &Path) -> PathBuf {
        engine_root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join("Linux")
            .join("Build.sh")
    }

    fn default_libraries(&self) -> Vec<String> {
        vec![LIBCXX.to_string()]
    }

    fn library_overrides(&self, version: &EngineVersion) -> LibraryOverrides {
        let mut overrides = LibraryOverrides::new();
        overrides.insert(LIBCXX.to_string(), libcxx_override(version));
        overrides
    }
}
