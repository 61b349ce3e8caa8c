//! Library queries backing the `ue4` library commands.
//!
//! Each query takes the raw argument list of its command. Leading
//! pseudo-flags are consumed positionally, in this order and only where the
//! query accepts them: `--multiline`, `--flagsonly`, `--nodefaults`.
//! Everything after them is a library name.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::core::details::{LibraryDetails, LibraryOverrides};
use crate::interrogator::catalog::LibraryCatalog;
use crate::interrogator::custom_flags;
use crate::interrogator::format::{FlagFormatter, PrintFormat};
use crate::ops::engine::DEFAULT_CONFIGURATION;

pub const MULTILINE: &str = "--multiline";
pub const FLAGS_ONLY: &str = "--flagsonly";
pub const NO_DEFAULTS: &str = "--nodefaults";

/// The kind of library query, which decides the accepted pseudo-flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    CompilerFlags,
    LinkerFlags,
    CMakeFlags,
    IncludeDirs,
    LibraryFiles,
    Definitions,
}

impl QueryKind {
    fn accepts_multiline(&self) -> bool {
        matches!(
            self,
            QueryKind::CompilerFlags | QueryKind::LinkerFlags | QueryKind::CMakeFlags
        )
    }

    fn accepts_flags_only(&self) -> bool {
        matches!(self, QueryKind::LinkerFlags)
    }
}

/// Parsed query arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryArgs {
    pub format: PrintFormat,
    /// Include link directories and library files in linker flags
    pub include_libs: bool,
    /// Prepend the platform's default libraries
    pub include_defaults: bool,
    pub libraries: Vec<String>,
}

impl QueryArgs {
    pub fn parse(kind: QueryKind, args: &[String]) -> Self {
        let mut rest = args;
        let mut take = |flag: &str| match rest.split_first() {
            Some((first, tail)) if first == flag => {
                rest = tail;
                true
            }
            _ => false,
        };

        let multiline = kind.accepts_multiline() && take(MULTILINE);
        let flags_only = kind.accepts_flags_only() && take(FLAGS_ONLY);
        let no_defaults = take(NO_DEFAULTS);

        QueryArgs {
            format: if multiline {
                PrintFormat::MultiLine
            } else {
                PrintFormat::SingleLine
            },
            include_libs: !flags_only,
            include_defaults: !no_defaults,
            libraries: rest.to_vec(),
        }
    }
}

/// Library queries against one engine's catalog.
pub struct LibraryQuery<'a> {
    catalog: LibraryCatalog<'a>,
    root: String,
    platform: String,
    configuration: String,
    overrides: LibraryOverrides,
    defaults: Vec<String>,
}

impl<'a> LibraryQuery<'a> {
    pub fn new(
        catalog: LibraryCatalog<'a>,
        root: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        LibraryQuery {
            catalog,
            root: root.into(),
            platform: platform.into(),
            configuration: DEFAULT_CONFIGURATION.to_string(),
            overrides: LibraryOverrides::new(),
            defaults: Vec::new(),
        }
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = configuration.into();
        self
    }

    pub fn with_overrides(mut self, overrides: LibraryOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_defaults(mut self, defaults: Vec<String>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Every supported library name.
    pub fn list_libraries(&self) -> Result<BTreeSet<String>> {
        self.catalog
            .list(&self.platform, &self.configuration, &self.overrides)
    }

    /// Details for `libraries`, optionally preceded by the platform defaults.
    pub fn details(&self, libraries: &[String], include_defaults: bool) -> Result<LibraryDetails> {
        let names: Vec<String> = if include_defaults {
            self.defaults.iter().chain(libraries).cloned().collect()
        } else {
            libraries.to_vec()
        };

        let result = self.catalog.interrogate(
            &self.platform,
            &self.configuration,
            &names,
            &self.overrides,
        )?;
        Ok(result.details)
    }

    fn prepare(&self, kind: QueryKind, args: &[String]) -> Result<(QueryArgs, LibraryDetails, FlagFormatter)> {
        let parsed = QueryArgs::parse(kind, args);
        let details = self.details(&parsed.libraries, parsed.include_defaults)?;
        let formatter = FlagFormatter::new(details.convention(), self.root.clone(), parsed.format);
        Ok((parsed, details, formatter))
    }

    /// `[--multiline] [--nodefaults] [LIBS]`
    pub fn compiler_flags(&self, args: &[String]) -> Result<String> {
        let (_, details, formatter) = self.prepare(QueryKind::CompilerFlags, args)?;
        Ok(formatter.compiler_flags(&details))
    }

    /// `[--multiline] [--flagsonly] [--nodefaults] [LIBS]`
    pub fn linker_flags(&self, args: &[String]) -> Result<String> {
        let (parsed, details, formatter) = self.prepare(QueryKind::LinkerFlags, args)?;
        Ok(formatter.linker_flags(&details, parsed.include_libs))
    }

    /// `[--multiline] [--nodefaults] [LIBS]`, with library-specific extras.
    pub fn cmake_flags(&self, args: &[String]) -> Result<String> {
        let (_, mut details, formatter) = self.prepare(QueryKind::CMakeFlags, args)?;
        custom_flags::apply(&mut details);
        Ok(formatter.cmake_flags(&details))
    }

    /// `[--nodefaults] [LIBS]`
    pub fn include_dirs(&self, args: &[String]) -> Result<String> {
        let (_, details, formatter) = self.prepare(QueryKind::IncludeDirs, args)?;
        Ok(formatter.include_dirs(&details))
    }

    /// `[--nodefaults] [LIBS]`
    pub fn library_files(&self, args: &[String]) -> Result<String> {
        let (_, details, formatter) = self.prepare(QueryKind::LibraryFiles, args)?;
        Ok(formatter.library_files(&details))
    }

    /// `[--nodefaults] [LIBS]`
    pub fn definitions(&self, args: &[String]) -> Result<String> {
        let (_, details, formatter) = self.prepare(QueryKind::Definitions, args)?;
        Ok(formatter.definitions(&details))
    }
}
