//! Normalization of raw UBT module records.
//!
//! UBT has renamed and split several module fields over the engine's
//! lifetime. [`normalize`] absorbs every variant into [`ThirdPartyModule`]
//! using the rules enabled for the installed engine in the compatibility
//! table, so nothing downstream branches on engine version.

use serde_json::{Map, Value};

use crate::core::compat::SchemaRules;
use crate::core::errors::InterrogateError;
use crate::core::module::ThirdPartyModule;
use crate::interrogator::paths::{resolve, resolve_list};
use crate::util::fs::forward_slashes;

const NAME: &str = "Name";
const DIRECTORY: &str = "Directory";
const PUBLIC_INCLUDE_PATHS: &str = "PublicIncludePaths";
const PUBLIC_SYSTEM_INCLUDE_PATHS: &str = "PublicSystemIncludePaths";
const PRIVATE_INCLUDE_PATHS: &str = "PrivateIncludePaths";
const PUBLIC_LIBRARY_PATHS: &str = "PublicLibraryPaths";
const PUBLIC_SYSTEM_LIBRARY_PATHS: &str = "PublicSystemLibraryPaths";
const PUBLIC_ADDITIONAL_LIBRARIES: &str = "PublicAdditionalLibraries";
const PUBLIC_LIBRARIES: &str = "PublicLibraries";
const PUBLIC_SYSTEM_LIBRARIES: &str = "PublicSystemLibraries";
const PUBLIC_DEFINITIONS: &str = "PublicDefinitions";
const LEGACY_DEFINITIONS: &str = "Definitions";

/// Read a string list field. A lone string counts as a one-element list.
fn string_list(record: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match record.get(key)? {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Read `key`, falling back to `alias` when `key` is absent and `enabled`.
fn aliased_list(
    record: &Map<String, Value>,
    key: &str,
    alias: &str,
    enabled: bool,
) -> Vec<String> {
    string_list(record, key)
        .or_else(|| {
            if enabled {
                string_list(record, alias)
            } else {
                None
            }
        })
        .unwrap_or_default()
}

/// The raw `Directory` of a module record, if it has one.
pub fn raw_directory(record: &Value) -> Option<&str> {
    record.get(DIRECTORY).and_then(Value::as_str)
}

/// Normalize one raw module record, resolving paths against `root`.
pub fn normalize(
    record: &Value,
    rules: &SchemaRules,
    root: &str,
) -> Result<ThirdPartyModule, InterrogateError> {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    let name = fields
        .get(NAME)
        .and_then(Value::as_str)
        .ok_or_else(|| InterrogateError::Schema {
            field: NAME,
            module: "<unnamed>".to_string(),
        })?
        .to_string();

    let directory = fields
        .get(DIRECTORY)
        .and_then(Value::as_str)
        .ok_or_else(|| InterrogateError::Schema {
            field: DIRECTORY,
            module: name.clone(),
        })?;

    let library_paths = resolve_list(
        &aliased_list(
            fields,
            PUBLIC_LIBRARY_PATHS,
            PUBLIC_SYSTEM_LIBRARY_PATHS,
            true,
        ),
        root,
    );

    // Bare filenames are qualified by the first library path.
    let additional_libraries = aliased_list(
        fields,
        PUBLIC_ADDITIONAL_LIBRARIES,
        PUBLIC_LIBRARIES,
        true,
    )
    .iter()
    .map(|lib| {
        let lib = forward_slashes(lib);
        match library_paths.first() {
            Some(dir) if !lib.contains('/') => format!("{}/{}", dir, lib),
            _ => resolve(&lib, root),
        }
    })
    .collect();

    Ok(ThirdPartyModule {
        directory: resolve(directory, root),
        public_include_dirs: resolve_list(
            &string_list(fields, PUBLIC_INCLUDE_PATHS).unwrap_or_default(),
            root,
        ),
        system_include_dirs: resolve_list(
            &string_list(fields, PUBLIC_SYSTEM_INCLUDE_PATHS).unwrap_or_default(),
            root,
        ),
        private_include_dirs: resolve_list(
            &string_list(fields, PRIVATE_INCLUDE_PATHS).unwrap_or_default(),
            root,
        ),
        library_paths,
        additional_libraries,
        system_libraries: string_list(fields, PUBLIC_SYSTEM_LIBRARIES).unwrap_or_default(),
        definitions: aliased_list(
            fields,
            PUBLIC_DEFINITIONS,
            LEGACY_DEFINITIONS,
            rules.alias_legacy_definitions,
        ),
        name,
    })
}
