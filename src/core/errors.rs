//! Interrogation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while interrogating UnrealBuildTool.
#[derive(Debug, Error)]
pub enum InterrogateError {
    /// A JSON document could not be parsed into the expected shape.
    #[error("failed to load `{}`: {message}", .path.display())]
    DataFormat { path: PathBuf, message: String },

    /// UnrealBuildTool exited with a non-zero status.
    #[error(
        "`{command}` failed with exit code {}\nstdout: {stdout}\nstderr: {stderr}",
        .status.map_or_else(|| "none".to_string(), |s| s.to_string())
    )]
    ExternalTool {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// UnrealBuildTool reported success but wrote no export file.
    #[error("UnrealBuildTool did not write the JSON export `{}`", .path.display())]
    MissingExport { path: PathBuf },

    /// A module record lacks one of its identity fields.
    #[error("module record {module} is missing required field `{field}`")]
    Schema { field: &'static str, module: String },
}
