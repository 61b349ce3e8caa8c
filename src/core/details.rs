//! Resolved build details for a set of third-party libraries.

use std::collections::BTreeMap;

use crate::core::convention::FlagConvention;
use crate::util::fs::forward_slashes;

/// Placeholder standing in for the engine root inside stored paths.
///
/// Paths keep this token until render time so one set of details can be
/// rendered against any root.
pub const ROOT_PLACEHOLDER: &str = "%UE4_ROOT%";

/// Details for library names served without asking UBT, keyed by name.
pub type LibraryOverrides = BTreeMap<String, LibraryDetails>;

/// Include/link/definition data for one or more libraries.
///
/// Path-like fields hold forward-slash strings anchored at
/// [`ROOT_PLACEHOLDER`]. The flag convention is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDetails {
    /// Directories for the build generator's prefix search path
    pub prefix_dirs: Vec<String>,
    /// Header search directories
    pub include_dirs: Vec<String>,
    /// Library search directories
    pub link_dirs: Vec<String>,
    /// Library files (fully qualified where possible)
    pub libs: Vec<String>,
    /// System libraries, rendered with the system-lib prefix
    pub system_libs: Vec<String>,
    /// Preprocessor definitions
    pub definitions: Vec<String>,
    /// Raw compiler flags
    pub cxx_flags: Vec<String>,
    /// Raw linker flags
    pub ld_flags: Vec<String>,
    /// Raw CMake flags
    pub cmake_flags: Vec<String>,
    convention: FlagConvention,
}

fn paths(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    items
        .into_iter()
        .map(|p| forward_slashes(&p.into()))
        .collect()
}

fn strings(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

impl LibraryDetails {
    /// Create empty details using the given flag convention.
    pub fn new(convention: FlagConvention) -> Self {
        LibraryDetails {
            prefix_dirs: Vec::new(),
            include_dirs: Vec::new(),
            link_dirs: Vec::new(),
            libs: Vec::new(),
            system_libs: Vec::new(),
            definitions: Vec::new(),
            cxx_flags: Vec::new(),
            ld_flags: Vec::new(),
            cmake_flags: Vec::new(),
            convention,
        }
    }

    pub fn with_prefix_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.prefix_dirs = paths(dirs);
        self
    }

    pub fn with_include_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_dirs = paths(dirs);
        self
    }

    pub fn with_link_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.link_dirs = paths(dirs);
        self
    }

    pub fn with_libs(mut self, libs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.libs = paths(libs);
        self
    }

    pub fn with_system_libs(mut self, libs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.system_libs = strings(libs);
        self
    }

    pub fn with_definitions(mut self, defs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.definitions = strings(defs);
        self
    }

    pub fn with_cxx_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cxx_flags = strings(flags);
        self
    }

    pub fn with_ld_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ld_flags = strings(flags);
        self
    }

    pub fn with_cmake_flags(mut self, flags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cmake_flags = strings(flags);
        self
    }

    /// The flag convention these details were built for.
    pub fn convention(&self) -> FlagConvention {
        self.convention
    }

    /// Append every list of `other` to the matching list of `self`.
    ///
    /// Order and duplicates are preserved. The flag convention of `self` is
    /// kept; merging details built for different conventions is not checked.
    pub fn merge(&mut self, other: &LibraryDetails) {
        self.prefix_dirs.extend_from_slice(&other.prefix_dirs);
        self.include_dirs.extend_from_slice(&other.include_dirs);
        self.link_dirs.extend_from_slice(&other.link_dirs);
        self.libs.extend_from_slice(&other.libs);
        self.system_libs.extend_from_slice(&other.system_libs);
        self.definitions.extend_from_slice(&other.definitions);
        self.cxx_flags.extend_from_slice(&other.cxx_flags);
        self.ld_flags.extend_from_slice(&other.ld_flags);
        self.cmake_flags.extend_from_slice(&other.cmake_flags);
    }

    /// Whether every list is empty.
    pub fn is_empty(&self) -> bool {
        self.prefix_dirs.is_empty()
            && self.include_dirs.is_empty()
            && self.link_dirs.is_empty()
            && self.libs.is_empty()
            && self.system_libs.is_empty()
            && self.definitions.is_empty()
            && self.cxx_flags.is_empty()
            && self.ld_flags.is_empty()
            && self.cmake_flags.is_empty()
    }
}
