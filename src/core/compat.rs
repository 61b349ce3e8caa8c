//! Engine version compatibility table.
//!
//! UnrealBuildTool has changed both the way JSON export mode is invoked and
//! the shape of the module records it writes. Every version-dependent
//! decision is made here, by looking up the entry whose range contains the
//! installed engine version. Nothing else in the crate compares versions.
//!
//! | Engine            | Invocation                            | Editor target  | Definitions         |
//! |-------------------|---------------------------------------|----------------|---------------------|
//! | `< 4.19`          | `-gather -jsonexport=F -SkipBuild`    | `UE4Editor`    | `Definitions`       |
//! | `4.19 ..< 4.22`   | `-gather -jsonexport=F -SkipBuild`    | `UE4Editor`    | `PublicDefinitions` |
//! | `4.22 ..< 5.0`    | `-Mode=JsonExport -OutputFile=F`      | `UE4Editor`    | `PublicDefinitions` |
//! | `>= 5.0`          | `-Mode=JsonExport -OutputFile=F`      | `UnrealEditor` | `PublicDefinitions` |
//!
//! The library field renames (`PublicSystemLibraryPaths`, `PublicLibraries`)
//! are aliased for every version, since each alias only applies when the
//! older field is absent.

use std::path::Path;

use semver::Version;

use crate::core::version::EngineVersion;

/// How UnrealBuildTool is asked to export its module graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportInvocation {
    /// `-gather -jsonexport=<file> -SkipBuild`
    Gather,
    /// `-Mode=JsonExport -OutputFile=<file>`
    Mode,
}

impl ExportInvocation {
    /// Build the UBT arguments that write the export to `output`.
    pub fn args(&self, output: &Path) -> Vec<String> {
        let output = output.display();
        match self {
            ExportInvocation::Gather => vec![
                "-gather".to_string(),
                format!("-jsonexport={}", output),
                "-SkipBuild".to_string(),
            ],
            ExportInvocation::Mode => vec![
                "-Mode=JsonExport".to_string(),
                format!("-OutputFile={}", output),
            ],
        }
    }
}

/// Version-dependent normalization rules for module records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemaRules {
    /// Alias legacy `Definitions` into `PublicDefinitions`.
    pub alias_legacy_definitions: bool,
}

/// One row of the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatEntry {
    /// Inclusive lower bound.
    pub min: Version,
    /// Exclusive upper bound, `None` for open-ended.
    pub max: Option<Version>,
    pub invocation: ExportInvocation,
    /// Editor target passed to UBT alongside the export arguments.
    pub editor_target: &'static str,
    pub rules: SchemaRules,
}

impl CompatEntry {
    /// Whether `version` falls inside this entry's range.
    pub fn contains(&self, version: &Version) -> bool {
        *version >= self.min && self.max.as_ref().map_or(true, |max| version < max)
    }
}

/// Compatibility entries, ordered by version.
pub static COMPAT_TABLE: [CompatEntry; 4] = [
    CompatEntry {
        min: Version::new(0, 0, 0),
        max: Some(Version::new(4, 19, 0)),
        invocation: ExportInvocation::Gather,
        editor_target: "UE4Editor",
        rules: SchemaRules {
            alias_legacy_definitions: true,
        },
    },
    CompatEntry {
        min: Version::new(4, 19, 0),
        max: Some(Version::new(4, 22, 0)),
        invocation: ExportInvocation::Gather,
        editor_target: "UE4Editor",
        rules: SchemaRules {
            alias_legacy_definitions: false,
        },
    },
    CompatEntry {
        min: Version::new(4, 22, 0),
        max: Some(Version::new(5, 0, 0)),
        invocation: ExportInvocation::Mode,
        editor_target: "UE4Editor",
        rules: SchemaRules {
            alias_legacy_definitions: false,
        },
    },
    CompatEntry {
        min: Version::new(5, 0, 0),
        max: None,
        invocation: ExportInvocation::Mode,
        editor_target: "UnrealEditor",
        rules: SchemaRules {
            alias_legacy_definitions: false,
        },
    },
];

/// Look up the compatibility entry for an engine version.
pub fn compat_for(version: &EngineVersion) -> &'static CompatEntry {
    let version = version.semver();
    COMPAT_TABLE
        .iter()
        .find(|entry| entry.contains(&version))
        // The table covers 0.0.0 upwards with no gaps.
        .unwrap_or(&COMPAT_TABLE[COMPAT_TABLE.len() - 1])
}
