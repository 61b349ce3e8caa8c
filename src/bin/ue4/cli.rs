//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// ue4 - Unreal Engine third-party library interrogation
#[derive(Parser)]
#[command(name = "ue4")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set an engine root path override that supersedes auto-detection
    Setroot(SetrootArgs),

    /// Remove any previously-specified engine root path override
    Clearroot,

    /// Clear any cached data ue4cli has stored
    Clearcache,

    /// Print the path to the root directory of the Unreal Engine
    Root,

    /// Print the version string of the Unreal Engine
    Version(VersionArgs),

    /// Print the compatible changelist of the Unreal Engine
    Changelist,

    /// List the supported third-party libraries
    Libs,

    /// Print compiler flags for building against libraries
    #[command(override_usage = "ue4 cxxflags [--multiline] [--nodefaults] [LIBS]...")]
    Cxxflags(LibraryArgs),

    /// Print linker flags for building against libraries
    #[command(override_usage = "ue4 ldflags [--multiline] [--flagsonly] [--nodefaults] [LIBS]...")]
    Ldflags(LibraryArgs),

    /// Print CMake flags for building against libraries
    #[command(override_usage = "ue4 cmakeflags [--multiline] [--nodefaults] [LIBS]...")]
    Cmakeflags(LibraryArgs),

    /// Print include directories for building against libraries
    #[command(override_usage = "ue4 includedirs [--nodefaults] [LIBS]...")]
    Includedirs(LibraryArgs),

    /// Print library files for building against libraries
    #[command(override_usage = "ue4 libfiles [--nodefaults] [LIBS]...")]
    Libfiles(LibraryArgs),

    /// Print preprocessor definitions for building against libraries
    #[command(override_usage = "ue4 defines [--nodefaults] [LIBS]...")]
    Defines(LibraryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct SetrootArgs {
    /// Engine root directory
    pub dir: PathBuf,
}

#[derive(Args)]
pub struct VersionArgs {
    /// Output format: major, minor, patch, full or short
    #[arg(default_value = "full")]
    pub format: String,
}

#[derive(Args)]
pub struct LibraryArgs {
    /// Leading pseudo-flags followed by library names
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
