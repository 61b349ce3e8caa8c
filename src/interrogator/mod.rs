//! Third-party library interrogation.
//!
//! - [`paths`]: resolving UBT paths against an engine root
//! - [`schema`]: normalizing raw module records across UBT versions
//! - [`catalog`]: running the export, caching it and building details
//! - [`custom_flags`]: extra CMake flags for specific libraries
//! - [`format`]: rendering details into flag strings

pub mod catalog;
pub mod custom_flags;
pub mod format;
pub mod paths;
pub mod schema;

pub use catalog::{ExportRunner, Interrogation, LibraryCatalog};
pub use format::{FlagFormatter, PrintFormat};
