//! Extra CMake flags for vendored libraries whose find modules ignore the
//! generic search paths.

use crate::core::details::LibraryDetails;

/// Include directory substrings and the CMake variable they set.
const INCLUDE_DIR_FLAGS: &[(&str, &str)] = &[("libPNG-", "PNG_PNG_INCLUDE_DIR")];

/// Normalized library names and the CMake variable they set.
const LIBRARY_FLAGS: &[(&str, &str)] = &[
    ("png", "PNG_LIBRARY"),
    ("z", "ZLIB_LIBRARY"),
    ("z_fPIC", "ZLIB_LIBRARY"),
    ("zlibstatic", "ZLIB_LIBRARY"),
];

/// Reduce a library path to the name used for matching.
///
/// `.../libpng15.a` becomes `png`: basename, extension, one leading `lib`,
/// then trailing digits, `_` and `-`.
pub fn library_name(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(idx) if idx > 0 => &file[..idx],
        _ => file,
    };
    let name = stem.strip_prefix("lib").unwrap_or(stem);
    name.trim_end_matches(|c: char| c.is_ascii_digit() || c == '_' || c == '-')
}

/// Append the custom CMake flags matching `details` to its CMake flags.
pub fn apply(details: &mut LibraryDetails) {
    let mut flags = Vec::new();

    for dir in &details.include_dirs {
        for (pattern, variable) in INCLUDE_DIR_FLAGS {
            if dir.contains(pattern) {
                flags.push(format!("-D{}={}", variable, dir));
            }
        }
    }

    for lib in &details.libs {
        let name = library_name(lib);
        if let Some((_, variable)) = LIBRARY_FLAGS.iter().find(|(key, _)| *key == name) {
            flags.push(format!("-D{}={}", variable, lib));
        }
    }

    details.cmake_flags.extend(flags);
}
