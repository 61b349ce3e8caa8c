//! The installed engine: root discovery, version and UBT invocation.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::convention::FlagConvention;
use crate::core::details::LibraryOverrides;
use crate::core::version::{EngineVersion, VersionFormat};
use crate::interrogator::catalog::{ExportRunner, LibraryCatalog};
use crate::ops::libs::LibraryQuery;
use crate::platform::HostPlatform;
use crate::util::cache::DataCache;
use crate::util::config::Config;
use crate::util::context::GlobalContext;
use crate::util::process::{ProcessBuilder, ProcessOutput};
use crate::util::sentinel::sentinel_file;

/// Build configuration used for interrogation.
pub const DEFAULT_CONFIGURATION: &str = "Development";

/// Resolve the engine root: the configured override, else auto-detection.
pub fn engine_root(config: &Config, platform: &dyn HostPlatform) -> Result<PathBuf> {
    if let Some(root) = &config.engine.root {
        tracing::info!("Using user-specified engine root: {}", root.display());
        return Ok(root.clone());
    }

    match platform.detect_engine_root() {
        Some(root) => Ok(root),
        None => bail!(
            "could not detect the location of the latest installed Unreal Engine version \
             (use `ue4 setroot` to specify it)"
        ),
    }
}

/// Store `dir` as the engine root override. Returns the absolute path stored.
///
/// A directory without a readable `Build.version` is still stored, with a
/// warning.
pub fn set_root(ctx: &GlobalContext, dir: &Path) -> Result<PathBuf> {
    let root = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to get current directory")?
            .join(dir)
    };

    let mut config = ctx.config_for_update()?;
    config.engine.root = Some(root.clone());
    config.save(&ctx.config_path())?;

    if EngineVersion::load(&root).is_err() {
        tracing::warn!(
            "the specified directory does not appear to contain a valid version of the Unreal Engine"
        );
    }

    Ok(root)
}

/// Remove any engine root override.
pub fn clear_root(ctx: &GlobalContext) -> Result<()> {
    let mut config = ctx.config_for_update()?;
    config.engine.root = None;
    config.save(&ctx.config_path())
}

/// Remove every cached interrogation result.
pub fn clear_cache(ctx: &GlobalContext) -> Result<()> {
    ctx.cache().clear()
}

/// An installed engine on the host platform.
pub struct UnrealEngine {
    ctx: GlobalContext,
    platform: Box<dyn HostPlatform>,
    config: Config,
    root: PathBuf,
    version: EngineVersion,
}

impl UnrealEngine {
    /// Locate the engine and read its version.
    pub fn open(ctx: GlobalContext, platform: Box<dyn HostPlatform>) -> Result<Self> {
        let config = ctx.config();
        let root = engine_root(&config, platform.as_ref())?;
        let version = EngineVersion::load(&root)?;

        let engine = UnrealEngine {
            ctx,
            platform,
            config,
            root,
            version,
        };

        tracing::debug!(
            "Found Unreal Engine {} ({}) at {}",
            engine.version,
            if engine.is_installed_build() {
                "Installed Build"
            } else {
                "source build"
            },
            engine.root.display()
        );

        Ok(engine)
    }

    pub fn context(&self) -> &GlobalContext {
        &self.ctx
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> &EngineVersion {
        &self.version
    }

    pub fn platform(&self) -> &dyn HostPlatform {
        self.platform.as_ref()
    }

    pub fn version_string(&self, format: VersionFormat) -> String {
        self.version.format(format)
    }

    pub fn changelist(&self) -> u64 {
        self.version.changelist
    }

    /// Whether this is an Installed Build rather than a source build.
    pub fn is_installed_build(&self) -> bool {
        sentinel_file(&self.root).exists()
    }

    pub fn convention(&self) -> FlagConvention {
        self.platform.convention()
    }

    /// Platform overrides, replaced by user overrides of the same name.
    pub fn library_overrides(&self) -> LibraryOverrides {
        let mut overrides = self.platform.library_overrides(&self.version);
        overrides.extend(self.config.library_overrides(self.convention()));
        overrides
    }

    /// Runner invoking this engine's build script.
    pub fn build_tool(&self) -> BuildToolRunner<'_> {
        BuildToolRunner {
            engine: self,
            script: self.platform.build_script(&self.root),
        }
    }

    /// Catalog for this engine backed by `cache` and `runner`.
    pub fn catalog<'a>(
        &self,
        cache: &'a dyn DataCache,
        runner: &'a dyn ExportRunner,
    ) -> LibraryCatalog<'a> {
        LibraryCatalog::new(&self.root, &self.version, self.convention(), cache, runner)
            .with_sentinel_rename(self.ctx.sentinel_rename())
    }

    /// Query surface for this engine backed by `cache` and `runner`.
    pub fn query<'a>(
        &self,
        cache: &'a dyn DataCache,
        runner: &'a dyn ExportRunner,
    ) -> LibraryQuery<'a> {
        LibraryQuery::new(
            self.catalog(cache, runner),
            self.root.to_string_lossy(),
            self.platform.identifier(),
        )
        .with_overrides(self.library_overrides())
        .with_defaults(self.platform.default_libraries())
    }
}

/// [`ExportRunner`] that invokes the engine's build script.
pub struct BuildToolRunner<'a> {
    engine: &'a UnrealEngine,
    script: PathBuf,
}

impl BuildToolRunner<'_> {
    pub fn script(&self) -> &Path {
        &self.script
    }

    fn spinner() -> Option<ProgressBar> {
        if !std::io::stderr().is_terminal() {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Interrogating UnrealBuildTool...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

impl ExportRunner for BuildToolRunner<'_> {
    fn run_export(
        &self,
        target: &str,
        platform: &str,
        configuration: &str,
        args: &[String],
    ) -> Result<ProcessOutput> {
        let platform = self
            .engine
            .platform
            .build_tool_platform(platform, &self.engine.version);

        let process = ProcessBuilder::new(&self.script)
            .arg(target)
            .arg(&platform)
            .arg(configuration)
            .args(args)
            .cwd(&self.engine.root);

        let spinner = Self::spinner();
        let output = process.exec();
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        output
    }
}
