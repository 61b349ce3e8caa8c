//! Normalized third-party module records.

use serde::{Deserialize, Serialize};

/// One UBT third-party module after schema normalization.
///
/// Every list is present (possibly empty). Paths are forward-slash
/// normalized and anchored at the root placeholder, except bare library
/// filenames that had no library path to qualify them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyModule {
    pub name: String,
    pub directory: String,
    #[serde(default)]
    pub public_include_dirs: Vec<String>,
    #[serde(default)]
    pub system_include_dirs: Vec<String>,
    #[serde(default)]
    pub private_include_dirs: Vec<String>,
    #[serde(default)]
    pub library_paths: Vec<String>,
    #[serde(default)]
    pub additional_libraries: Vec<String>,
    #[serde(default)]
    pub system_libraries: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<String>,
}
