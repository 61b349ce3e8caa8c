//! The third-party library catalog.
//!
//! The catalog is UBT's view of every module under `Engine/Source/ThirdParty`,
//! normalized and cached per engine version. [`LibraryCatalog::interrogate`]
//! turns a list of requested library names into one [`LibraryDetails`].

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::compat::{compat_for, CompatEntry, SchemaRules};
use crate::core::convention::FlagConvention;
use crate::core::details::{LibraryDetails, LibraryOverrides, ROOT_PLACEHOLDER};
use crate::core::errors::InterrogateError;
use crate::core::module::ThirdPartyModule;
use crate::core::version::EngineVersion;
use crate::interrogator::paths::{parent, resolve};
use crate::interrogator::schema::{normalize, raw_directory};
use crate::util::cache::DataCache;
use crate::util::fs::read_to_string;
use crate::util::process::ProcessOutput;
use crate::util::sentinel::{sentinel_file, SentinelRename};

/// Cache key holding the normalized module list.
pub const CATALOG_KEY: &str = "ThirdPartyLibraries";

/// Only modules whose directory contains this are kept.
pub const THIRD_PARTY_ROOT: &str = "Engine/Source/ThirdParty";

/// Name of the export file inside the temporary directory.
pub const EXPORT_FILE_NAME: &str = "ubt_output.json";

/// Runs UnrealBuildTool in JSON export mode.
pub trait ExportRunner {
    /// Invoke UBT for `target`/`platform`/`configuration` with extra `args`,
    /// capturing its output. A non-zero exit is not an error here.
    fn run_export(
        &self,
        target: &str,
        platform: &str,
        configuration: &str,
        args: &[String],
    ) -> Result<ProcessOutput>;
}

/// Result of [`LibraryCatalog::interrogate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interrogation {
    pub details: LibraryDetails,
    /// Requested names found neither in the catalog nor the overrides
    pub unsupported: Vec<String>,
}

/// UBT-backed catalog of third-party libraries for one engine install.
pub struct LibraryCatalog<'a> {
    engine_root: PathBuf,
    version_hash: String,
    compat: &'static CompatEntry,
    convention: FlagConvention,
    cache: &'a dyn DataCache,
    runner: &'a dyn ExportRunner,
    sentinel_rename: bool,
}

impl<'a> LibraryCatalog<'a> {
    pub fn new(
        engine_root: impl Into<PathBuf>,
        version: &EngineVersion,
        convention: FlagConvention,
        cache: &'a dyn DataCache,
        runner: &'a dyn ExportRunner,
    ) -> Self {
        LibraryCatalog {
            engine_root: engine_root.into(),
            version_hash: version.hash(),
            compat: compat_for(version),
            convention,
            cache,
            runner,
            sentinel_rename: false,
        }
    }

    /// Hide `InstalledBuild.txt` while UBT runs, when it exists.
    pub fn with_sentinel_rename(mut self, enabled: bool) -> Self {
        self.sentinel_rename = enabled;
        self
    }

    /// Names of every catalog module and every override, sorted and unique.
    pub fn list(
        &self,
        platform: &str,
        configuration: &str,
        overrides: &LibraryOverrides,
    ) -> Result<BTreeSet<String>> {
        let modules = self.modules(platform, configuration)?;

        Ok(modules
            .into_iter()
            .map(|m| m.name)
            .chain(overrides.keys().cloned())
            .collect())
    }

    /// Build the details for `names`.
    ///
    /// Names present in `overrides` are never looked up in the catalog; their
    /// overrides are merged in request order after the catalog modules.
    pub fn interrogate(
        &self,
        platform: &str,
        configuration: &str,
        names: &[String],
        overrides: &LibraryOverrides,
    ) -> Result<Interrogation> {
        let wanted: Vec<&String> = names
            .iter()
            .filter(|name| !overrides.contains_key(name.as_str()))
            .collect();

        let mut details = LibraryDetails::new(self.convention);
        let mut unsupported = Vec::new();

        if !wanted.is_empty() {
            let modules: Vec<ThirdPartyModule> = self
                .modules(platform, configuration)?
                .into_iter()
                .filter(|m| wanted.contains(&&m.name))
                .collect();

            let found: HashSet<&str> = modules.iter().map(|m| m.name.as_str()).collect();
            for name in wanted {
                if !found.contains(name.as_str()) && !unsupported.contains(name) {
                    unsupported.push(name.clone());
                }
            }

            if !unsupported.is_empty() {
                let quoted: Vec<String> =
                    unsupported.iter().map(|n| format!("\"{}\"", n)).collect();
                tracing::warn!("unsupported libraries {}", quoted.join(","));
            }

            details = self.flatten(&modules);
        }

        for name in names {
            if let Some(extra) = overrides.get(name) {
                details.merge(extra);
            }
        }

        Ok(Interrogation {
            details,
            unsupported,
        })
    }

    /// Flatten matched modules into one set of details.
    fn flatten(&self, modules: &[ThirdPartyModule]) -> LibraryDetails {
        let directories: Vec<String> = modules.iter().map(|m| m.directory.clone()).collect();
        let link_dirs = gather(modules, |m| &m.library_paths);
        let mut include_dirs = gather(modules, |m| &m.system_include_dirs);
        include_dirs.extend(gather(modules, |m| &m.public_include_dirs));
        include_dirs.extend(gather(modules, |m| &m.private_include_dirs));

        let mut prefix_dirs: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        let parents = include_dirs
            .iter()
            .chain(&link_dirs)
            .filter_map(|dir| parent(dir))
            .map(str::to_string)
            .collect::<Vec<_>>();
        for dir in directories
            .iter()
            .chain(&include_dirs)
            .chain(&link_dirs)
            .chain(&parents)
        {
            if seen.insert(dir.clone()) {
                prefix_dirs.push(dir.clone());
            }
        }

        LibraryDetails::new(self.convention)
            .with_prefix_dirs(prefix_dirs)
            .with_include_dirs(include_dirs)
            .with_link_dirs(link_dirs)
            .with_libs(gather(modules, |m| &m.additional_libraries))
            .with_system_libs(gather(modules, |m| &m.system_libraries))
            .with_definitions(gather(modules, |m| &m.definitions))
    }

    /// The normalized module list, from cache or a fresh UBT export.
    pub fn modules(&self, platform: &str, configuration: &str) -> Result<Vec<ThirdPartyModule>> {
        if let Some(cached) = self.cache.get(&self.version_hash, CATALOG_KEY)? {
            match serde_json::from_value::<Vec<ThirdPartyModule>>(cached) {
                Ok(modules) => {
                    tracing::debug!("Using cached library list for {}", self.version_hash);
                    return Ok(modules);
                }
                Err(e) => tracing::warn!("Ignoring unreadable cached library list: {}", e),
            }
        }

        let modules = self.export(platform, configuration)?;

        let value = serde_json::to_value(&modules).context("failed to serialize library list")?;
        self.cache.set(&self.version_hash, CATALOG_KEY, value)?;

        Ok(modules)
    }

    /// Run UBT in export mode and parse what it writes.
    fn export(&self, platform: &str, configuration: &str) -> Result<Vec<ThirdPartyModule>> {
        let temp_dir = tempfile::Builder::new()
            .prefix("ue4cli-")
            .tempdir()
            .context("failed to create temporary directory for the UBT export")?;
        let export_file = temp_dir.path().join(EXPORT_FILE_NAME);
        let args = self.compat.invocation.args(&export_file);
        let target = self.compat.editor_target;

        let sentinel = sentinel_file(&self.engine_root);
        let guard = if self.sentinel_rename && sentinel.exists() {
            Some(SentinelRename::acquire(&sentinel)?)
        } else {
            None
        };

        let outcome = self
            .runner
            .run_export(target, platform, configuration, &args)
            .and_then(|output| {
                if output.success() {
                    Ok(output)
                } else {
                    Err(InterrogateError::ExternalTool {
                        command: output.command,
                        status: output.status,
                        stdout: output.stdout,
                        stderr: output.stderr,
                    }
                    .into())
                }
            });
        let restored = guard.map_or(Ok(()), SentinelRename::release);

        match (outcome, restored) {
            (Ok(_), Ok(())) => {}
            (Ok(_), Err(restore_err)) => return Err(restore_err),
            (Err(export_err), restored) => {
                if let Err(restore_err) = restored {
                    tracing::error!("{:#}", restore_err);
                }
                return Err(export_err);
            }
        }

        if !export_file.exists() {
            return Err(InterrogateError::MissingExport { path: export_file }.into());
        }

        let contents = read_to_string(&export_file)?;
        Ok(parse_export(&contents, &export_file, &self.compat.rules)?)
    }
}

/// One field of every module, concatenated in module order.
fn gather<'m>(
    modules: &'m [ThirdPartyModule],
    field: impl Fn(&'m ThirdPartyModule) -> &'m Vec<String>,
) -> Vec<String> {
    modules.iter().flat_map(|m| field(m).iter().cloned()).collect()
}

/// Parse a UBT export document into normalized third-party modules.
pub fn parse_export(
    contents: &str,
    path: &Path,
    rules: &SchemaRules,
) -> Result<Vec<ThirdPartyModule>, InterrogateError> {
    let document: Value =
        serde_json::from_str(contents).map_err(|e| InterrogateError::DataFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let modules = document
        .get("Modules")
        .and_then(Value::as_object)
        .ok_or_else(|| InterrogateError::DataFormat {
            path: path.to_path_buf(),
            message: "missing top-level `Modules` object".to_string(),
        })?;

    modules
        .values()
        .filter(|record| {
            raw_directory(record)
                .map(|dir| resolve(dir, ROOT_PLACEHOLDER).contains(THIRD_PARTY_ROOT))
                .unwrap_or(false)
        })
        .map(|record| normalize(record, rules, ROOT_PLACEHOLDER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        export_document, zlib_and_png_modules, CapturedLogs, MemoryCache, ScriptedRunner,
    };
    use serde_json::json;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_export_filters_third_party() {
        let doc = export_document(zlib_and_png_modules()).to_string();
        let rules = compat_for(&EngineVersion::new(5, 1, 0)).rules;

        let modules = parse_export(&doc, Path::new("out.json"), &rules).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["UElibPNG", "zlib"]);
    }

    #[test]
    fn test_parse_export_malformed_json() {
        let rules = compat_for(&EngineVersion::new(5, 0, 0)).rules;
        let err = parse_export("{\"Modules\": [", Path::new("/tmp/out.json"), &rules).unwrap_err();
        match err {
            InterrogateError::DataFormat { path, .. } => assert_eq!(path, Path::new("/tmp/out.json")),
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_export("{}", Path::new("/tmp/out.json"), &rules).unwrap_err();
        assert!(err.to_string().contains("Modules"));
    }

    #[test]
    fn test_export_invocation_and_cache_population() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let version = EngineVersion::new(5, 2, 1);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let list = catalog.list("Linux", "Development", &LibraryOverrides::new()).unwrap();
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec!["UElibPNG", "zlib"]);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target, "UnrealEditor");
        assert_eq!(calls[0].platform, "Linux");
        assert_eq!(calls[0].configuration, "Development");
        assert_eq!(calls[0].args[0], "-Mode=JsonExport");
        assert!(calls[0].args[1].starts_with("-OutputFile="));
        assert!(calls[0].args[1].ends_with(EXPORT_FILE_NAME));

        assert!(cache.get(&version.hash(), CATALOG_KEY).unwrap().is_some());

        // Second call is served from the cache.
        catalog.list("Linux", "Development", &LibraryOverrides::new()).unwrap();
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_legacy_invocation_for_old_engines() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let version = EngineVersion::new(4, 21, 2);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        catalog.modules("Linux", "Development").unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].target, "UE4Editor");
        assert_eq!(calls[0].args[0], "-gather");
        assert!(calls[0].args[1].starts_with("-jsonexport="));
        assert_eq!(calls[0].args[2], "-SkipBuild");
    }

    #[test]
    fn test_unreadable_cache_entry_triggers_export() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let version = EngineVersion::new(5, 0, 0);
        cache.set(&version.hash(), CATALOG_KEY, json!({"stale": true})).unwrap();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let modules = catalog.modules("Linux", "Development").unwrap();

        assert_eq!(modules.len(), 2);
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_failed_export_is_external_tool_error() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::failing(6, "Building...", "ERROR: UBT exploded");
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let err = catalog.modules("Linux", "Development").unwrap_err();
        match err.downcast_ref::<InterrogateError>() {
            Some(InterrogateError::ExternalTool {
                command,
                status,
                stderr,
                ..
            }) => {
                assert!(command.starts_with("Build.sh UnrealEditor Linux Development -Mode=JsonExport -OutputFile="));
                assert_eq!(*status, Some(6));
                assert!(stderr.contains("UBT exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_export_file() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::silent();
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let err = catalog.modules("Linux", "Development").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InterrogateError>(),
            Some(InterrogateError::MissingExport { .. })
        ));
    }

    #[test]
    fn test_sentinel_restored_after_failed_export() {
        let tmp = TempDir::new().unwrap();
        let sentinel = sentinel_file(tmp.path());
        std::fs::create_dir_all(sentinel.parent().unwrap()).unwrap();
        std::fs::write(&sentinel, "").unwrap();

        let cache = MemoryCache::default();
        let runner = ScriptedRunner::failing(1, "", "").watching_sentinel(sentinel.clone());
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner)
                .with_sentinel_rename(true);

        assert!(catalog.modules("Linux", "Development").is_err());
        assert!(sentinel.exists());
        assert_eq!(runner.sentinel_seen(), Some(false));
    }

    #[test]
    fn test_sentinel_left_alone_by_default() {
        let tmp = TempDir::new().unwrap();
        let sentinel = sentinel_file(tmp.path());
        std::fs::create_dir_all(sentinel.parent().unwrap()).unwrap();
        std::fs::write(&sentinel, "").unwrap();

        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()))
            .watching_sentinel(sentinel.clone());
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        catalog.modules("Linux", "Development").unwrap();
        assert_eq!(runner.sentinel_seen(), Some(true));
    }

    #[test]
    fn test_interrogate_windows_zlib() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(json!({
            "zlib": {
                "Name": "zlib",
                "Directory": "ThirdParty/zlib",
                "PublicIncludePaths": ["ThirdParty/zlib/Inc"],
                "PublicLibraryPaths": ["ThirdParty/zlib/Lib"],
                "PublicAdditionalLibraries": ["z.lib"],
                "PublicDefinitions": ["WITH_ZLIB=1"],
            }
        })));
        let version = EngineVersion::new(4, 21, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::msvc(), &cache, &runner);

        let result = catalog
            .interrogate("Win64", "Development", &names(&["zlib"]), &LibraryOverrides::new())
            .unwrap();

        assert!(result.unsupported.is_empty());
        let details = result.details;
        assert_eq!(details.convention(), FlagConvention::msvc());
        assert_eq!(
            details.link_dirs,
            vec!["%UE4_ROOT%/Engine/Source/ThirdParty/zlib/Lib"]
        );
        assert_eq!(
            details.libs,
            vec!["%UE4_ROOT%/Engine/Source/ThirdParty/zlib/Lib/z.lib"]
        );
        assert_eq!(
            details.prefix_dirs,
            vec![
                "%UE4_ROOT%/Engine/Source/ThirdParty/zlib",
                "%UE4_ROOT%/Engine/Source/ThirdParty/zlib/Inc",
                "%UE4_ROOT%/Engine/Source/ThirdParty/zlib/Lib",
            ]
        );
        assert_eq!(details.definitions, vec!["WITH_ZLIB=1"]);
    }

    #[test]
    fn test_interrogate_reports_unknown_names() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let result = catalog
            .interrogate(
                "Linux",
                "Development",
                &names(&["zlib", "frobnicate"]),
                &LibraryOverrides::new(),
            )
            .unwrap();

        assert_eq!(result.unsupported, vec!["frobnicate"]);
        assert!(!result.details.include_dirs.is_empty());
        assert!(result
            .details
            .libs
            .iter()
            .all(|lib| lib.contains("ThirdParty/zlib")));
    }

    #[test]
    fn test_unsupported_libraries_warned_once() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);
        let logs = CapturedLogs::default();

        let result = logs
            .capture(|| {
                catalog.interrogate(
                    "Linux",
                    "Development",
                    &names(&["frobnicate", "zlib", "frobnicate", "nope"]),
                    &LibraryOverrides::new(),
                )
            })
            .unwrap();

        assert_eq!(result.unsupported, vec!["frobnicate", "nope"]);
        let output = logs.contents();
        assert_eq!(output.matches("unsupported libraries").count(), 1);
        assert!(output.contains(r#"unsupported libraries "frobnicate","nope""#));
    }

    #[test]
    fn test_failed_sentinel_restore_fails_export() {
        let tmp = TempDir::new().unwrap();
        let sentinel = sentinel_file(tmp.path());
        std::fs::create_dir_all(sentinel.parent().unwrap()).unwrap();
        std::fs::write(&sentinel, "").unwrap();
        let backup = sentinel.with_file_name("InstalledBuild.txt.bak");

        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()))
            .deleting_during_export(backup);
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner)
                .with_sentinel_rename(true);

        let err = catalog.modules("Linux", "Development").unwrap_err();

        assert!(format!("{:#}", err).contains("failed to rename"));
        assert!(!sentinel.exists());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_override_only_names_skip_ubt() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::failing(1, "", "should not run");
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let mut overrides = LibraryOverrides::new();
        overrides.insert(
            "libc++".to_string(),
            LibraryDetails::new(FlagConvention::posix()).with_cxx_flags(["-nostdinc++"]),
        );

        let result = catalog
            .interrogate("Linux", "Development", &names(&["libc++"]), &overrides)
            .unwrap();

        assert_eq!(result.details.cxx_flags, vec!["-nostdinc++"]);
        assert!(runner.calls().is_empty());

        let empty = catalog
            .interrogate("Linux", "Development", &[], &overrides)
            .unwrap();
        assert!(empty.details.is_empty());
    }

    #[test]
    fn test_overrides_merged_in_request_order() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);

        let mut overrides = LibraryOverrides::new();
        overrides.insert(
            "a".to_string(),
            LibraryDetails::new(FlagConvention::posix()).with_definitions(["A"]),
        );
        overrides.insert(
            "b".to_string(),
            LibraryDetails::new(FlagConvention::posix()).with_definitions(["B"]),
        );

        let result = catalog
            .interrogate("Linux", "Development", &names(&["b", "zlib", "a"]), &overrides)
            .unwrap();

        let defs = &result.details.definitions;
        assert_eq!(&defs[defs.len() - 2..], &["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_interrogate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let cache = MemoryCache::default();
        let runner = ScriptedRunner::writing(export_document(zlib_and_png_modules()));
        let version = EngineVersion::new(5, 0, 0);
        let catalog =
            LibraryCatalog::new(tmp.path(), &version, FlagConvention::posix(), &cache, &runner);
        let request = names(&["UElibPNG", "zlib"]);

        let first = catalog
            .interrogate("Linux", "Development", &request, &LibraryOverrides::new())
            .unwrap();
        let second = catalog
            .interrogate("Linux", "Development", &request, &LibraryOverrides::new())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(runner.calls().len(), 1);
    }
}
