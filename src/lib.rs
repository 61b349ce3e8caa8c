//! ue4cli - Unreal Engine third-party library interrogation
//!
//! This crate asks UnrealBuildTool which third-party libraries an engine
//! bundles and renders the compiler, linker and CMake flags needed to build
//! against them outside of UBT.

pub mod core;
pub mod interrogator;
pub mod ops;
pub mod platform;
pub mod util;

/// Test utilities and mocks for ue4cli unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory cache, a scripted UBT runner
/// and fake engine fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{EngineVersion, FlagConvention, InterrogateError, LibraryDetails, ThirdPartyModule};
pub use interrogator::{FlagFormatter, LibraryCatalog, PrintFormat};
pub use ops::{LibraryQuery, UnrealEngine};
pub use util::context::GlobalContext;
