//! Core data structures.
//!
//! This module contains the value types the interrogator produces and
//! consumes:
//! - Engine version and the version compatibility table
//! - Flag conventions
//! - Normalized third-party module records
//! - Library details and overrides

pub mod compat;
pub mod convention;
pub mod details;
pub mod errors;
pub mod module;
pub mod version;

pub use compat::{compat_for, CompatEntry, ExportInvocation, SchemaRules};
pub use convention::FlagConvention;
pub use details::{LibraryDetails, LibraryOverrides, ROOT_PLACEHOLDER};
pub use errors::InterrogateError;
pub use module::ThirdPartyModule;
pub use version::{EngineVersion, VersionFormat, VersionFormatError};
