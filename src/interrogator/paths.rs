//! Path normalization against an engine root.
//!
//! UBT reports paths relative to `Engine/Source`, absolute, or as bare
//! library filenames. Everything is turned into forward-slash strings, and
//! relative paths are anchored at a root (normally [`ROOT_PLACEHOLDER`]).

use crate::core::details::ROOT_PLACEHOLDER;
use crate::util::fs::forward_slashes;

/// Directory below the engine root that UBT paths are relative to.
pub const ENGINE_SOURCE_DIR: &str = "Engine/Source/";

/// Whether a forward-slash path is already anchored.
///
/// Anchored paths start with `/`, a drive letter (`C:/`) or the root
/// placeholder.
pub fn is_anchored(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with(ROOT_PLACEHOLDER) {
        return true;
    }

    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Resolve a single path against `root`.
///
/// Bare filenames are returned untouched since they name libraries, not
/// locations.
pub fn resolve(path: &str, root: &str) -> String {
    let normalized = forward_slashes(path);

    let mut stripped = normalized.as_str();
    while let Some(rest) = stripped.strip_prefix("../") {
        stripped = rest;
    }

    if is_anchored(stripped) || !stripped.contains('/') {
        stripped.to_string()
    } else {
        format!(
            "{}/{}{}",
            root.trim_end_matches(['/', '\\']),
            ENGINE_SOURCE_DIR,
            stripped
        )
    }
}

/// Resolve every path in `paths` against `root`.
pub fn resolve_list<S: AsRef<str>>(paths: &[S], root: &str) -> Vec<String> {
    paths.iter().map(|p| resolve(p.as_ref(), root)).collect()
}

/// Replace every root placeholder in `path` with `root`.
pub fn substitute_root(path: &str, root: &str) -> String {
    path.replace(ROOT_PLACEHOLDER, root)
}

/// Parent directory of a forward-slash path, `None` when it has none.
pub fn parent(path: &str) -> Option<&str> {
    match path.trim_end_matches('/').rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}
