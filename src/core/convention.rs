//! Flag prefix conventions.
//!
//! A [`FlagConvention`] carries the four prefix strings used when rendering
//! definitions, include directories, link directories and system libraries.
//! It is chosen by the host platform and handed to both
//! [`LibraryDetails`](crate::core::details::LibraryDetails) and the formatter.

/// Prefix strings for one compiler/linker family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagConvention {
    /// Prefix for preprocessor definitions (`-D`, `/D`)
    pub definition: &'static str,
    /// Prefix for include directories (`-I`, `/I`)
    pub include_dir: &'static str,
    /// Prefix for library search directories (`-L`, `/LIBPATH:`)
    pub link_dir: &'static str,
    /// Prefix for system libraries (`-l`, empty for MSVC)
    pub system_lib: &'static str,
}

impl FlagConvention {
    /// GCC/Clang style prefixes.
    pub const fn posix() -> Self {
        FlagConvention {
            definition: "-D",
            include_dir: "-I",
            link_dir: "-L",
            system_lib: "-l",
        }
    }

    /// MSVC style prefixes.
    pub const fn msvc() -> Self {
        FlagConvention {
            definition: "/D",
            include_dir: "/I",
            link_dir: "/LIBPATH:",
            system_lib: "",
        }
    }
}
