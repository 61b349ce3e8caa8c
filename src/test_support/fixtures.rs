//! Test fixtures: UBT export documents and fake engine trees.

use std::path::Path;

use serde_json::{json, Value};

/// Wrap module records in a UBT export document.
pub fn export_document(modules: Value) -> Value {
    json!({ "Modules": modules })
}

/// Two third-party modules and one engine module that must be filtered out.
pub fn zlib_and_png_modules() -> Value {
    json!({
        "Core": {
            "Name": "Core",
            "Directory": "Runtime/Core",
            "PublicIncludePaths": ["Runtime/Core/Public"],
        },
        "UElibPNG": {
            "Name": "UElibPNG",
            "Directory": "ThirdParty/libPNG",
            "PublicIncludePaths": ["ThirdParty/libPNG/libPNG-1.5.2"],
            "PublicLibraries": ["ThirdParty/libPNG/lib/Unix/x86_64-unknown-linux-gnu/libpng.a"],
            "PublicSystemLibraries": [],
        },
        "zlib": {
            "Name": "zlib",
            "Directory": "ThirdParty/zlib",
            "PublicSystemIncludePaths": ["ThirdParty/zlib/v1.2.8/include/Unix/x86_64-unknown-linux-gnu"],
            "PublicAdditionalLibraries": ["ThirdParty/zlib/v1.2.8/lib/Unix/x86_64-unknown-linux-gnu/libz_fPIC.a"],
            "PublicDefinitions": ["WITH_ZLIB=1"],
        },
    })
}

/// `Build.version` contents for an engine version.
pub fn build_version(major: u64, minor: u64, patch: u64) -> String {
    json!({
        "MajorVersion": major,
        "MinorVersion": minor,
        "PatchVersion": patch,
        "Changelist": 0,
        "CompatibleChangelist": 12345,
        "IsLicenseeVersion": 0,
        "IsPromotedBuild": 1,
        "BranchName": format!("++UE{}+Release-{}.{}", major, major, minor),
    })
    .to_string()
}

/// Create a minimal engine tree containing only `Build.version`.
pub fn create_fake_engine(root: &Path, major: u64, minor: u64, patch: u64) {
    let build_dir = root.join("Engine").join("Build");
    std::fs::create_dir_all(&build_dir).unwrap();
    std::fs::write(
        build_dir.join("Build.version"),
        build_version(major, minor, patch),
    )
    .unwrap();
}
