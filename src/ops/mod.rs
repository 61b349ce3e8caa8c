//! High-level operations.
//!
//! This module contains the implementation of the `ue4` commands.

pub mod engine;
pub mod libs;

pub use engine::{clear_cache, clear_root, engine_root, set_root, BuildToolRunner, UnrealEngine};
pub use libs::{LibraryQuery, QueryArgs, QueryKind};
