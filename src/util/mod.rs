//! Shared utilities

pub mod cache;
pub mod config;
pub mod context;
pub mod fs;
pub mod hash;
pub mod process;
pub mod sentinel;

pub use cache::{DataCache, JsonFileCache};
pub use config::Config;
pub use context::GlobalContext;
pub use process::{ProcessBuilder, ProcessOutput};
pub use sentinel::SentinelRename;
