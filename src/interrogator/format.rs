//! Rendering of library details into flag strings.
//!
//! The formatter is the only place the root placeholder is replaced with a
//! concrete engine root.

use crate::core::convention::FlagConvention;
use crate::core::details::LibraryDetails;
use crate::interrogator::paths::substitute_root;

/// How rendered tokens are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintFormat {
    /// Space-delimited, tokens containing whitespace wrapped in double quotes.
    #[default]
    SingleLine,
    /// One token per line, never quoted.
    MultiLine,
}

impl PrintFormat {
    pub fn delimiter(&self) -> &'static str {
        match self {
            PrintFormat::SingleLine => " ",
            PrintFormat::MultiLine => "\n",
        }
    }

    /// Join tokens, dropping empty ones.
    pub fn join<I, S>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let quote = matches!(self, PrintFormat::SingleLine);
        tokens
            .into_iter()
            .filter(|t| !t.as_ref().is_empty())
            .map(|t| {
                let t = t.as_ref();
                if quote && t.chars().any(char::is_whitespace) {
                    format!("\"{}\"", t)
                } else {
                    t.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(self.delimiter())
    }
}

/// Renders [`LibraryDetails`] against a concrete engine root.
#[derive(Debug, Clone)]
pub struct FlagFormatter {
    convention: FlagConvention,
    root: String,
    format: PrintFormat,
}

impl FlagFormatter {
    pub fn new(convention: FlagConvention, root: impl Into<String>, format: PrintFormat) -> Self {
        FlagFormatter {
            convention,
            root: root.into(),
            format,
        }
    }

    fn prefixed<'a>(&'a self, prefix: &'a str, items: &'a [String]) -> impl Iterator<Item = String> + 'a {
        items
            .iter()
            .map(move |item| format!("{}{}", prefix, substitute_root(item, &self.root)))
    }

    fn substituted<'a>(&'a self, items: &'a [String]) -> impl Iterator<Item = String> + 'a {
        self.prefixed("", items)
    }

    /// Tokens of [`FlagFormatter::compiler_flags`] before joining.
    pub fn compiler_tokens(&self, details: &LibraryDetails) -> Vec<String> {
        self.prefixed(self.convention.definition, &details.definitions)
            .chain(self.prefixed(self.convention.include_dir, &details.include_dirs))
            .chain(self.substituted(&details.cxx_flags))
            .collect()
    }

    /// Definitions, then include directories, then raw compiler flags.
    pub fn compiler_flags(&self, details: &LibraryDetails) -> String {
        self.format.join(self.compiler_tokens(details))
    }

    /// Raw linker flags, then (with `include_libs`) link directories, library
    /// files and system libraries.
    pub fn linker_flags(&self, details: &LibraryDetails, include_libs: bool) -> String {
        let mut tokens: Vec<String> = self.substituted(&details.ld_flags).collect();
        if include_libs {
            tokens.extend(self.prefixed(self.convention.link_dir, &details.link_dirs));
            tokens.extend(self.substituted(&details.libs));
            tokens.extend(self.prefixed(self.convention.system_lib, &details.system_libs));
        }
        self.format.join(tokens)
    }

    /// CMake search-path assignments followed by raw CMake flags.
    pub fn cmake_flags(&self, details: &LibraryDetails) -> String {
        let search_path = |dirs: &[String]| self.substituted(dirs).collect::<Vec<_>>().join(";");

        let mut tokens = vec![
            format!("-DCMAKE_PREFIX_PATH={}", search_path(&details.prefix_dirs)),
            format!("-DCMAKE_INCLUDE_PATH={}", search_path(&details.include_dirs)),
            format!("-DCMAKE_LIBRARY_PATH={}", search_path(&details.link_dirs)),
        ];
        tokens.extend(self.substituted(&details.cmake_flags));
        self.format.join(tokens)
    }

    /// Include directories, one per line.
    pub fn include_dirs(&self, details: &LibraryDetails) -> String {
        PrintFormat::MultiLine.join(self.substituted(&details.include_dirs))
    }

    /// Library files, one per line.
    pub fn library_files(&self, details: &LibraryDetails) -> String {
        PrintFormat::MultiLine.join(self.substituted(&details.libs))
    }

    /// Preprocessor definitions, one per line.
    pub fn definitions(&self, details: &LibraryDetails) -> String {
        PrintFormat::MultiLine.join(self.substituted(&details.definitions))
    }
}
