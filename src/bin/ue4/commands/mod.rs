//! Command implementations

pub mod cache;
pub mod completions;
pub mod libs;
pub mod root;
pub mod version;

use anyhow::Result;
use ue4cli::ops::UnrealEngine;
use ue4cli::platform;
use ue4cli::util::GlobalContext;

/// Open the engine for the host platform.
pub fn open_engine() -> Result<UnrealEngine> {
    UnrealEngine::open(GlobalContext::new()?, platform::host())
}
