//! ue4 CLI - Unreal Engine third-party library interrogation

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use ue4cli::util::context::{env_flag, VERBOSE_ENV};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for command output
    let filter = if cli.verbose || env_flag(VERBOSE_ENV) {
        EnvFilter::new("ue4cli=debug")
    } else {
        EnvFilter::new("ue4cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Setroot(args) => commands::root::setroot(args),
        Commands::Clearroot => commands::root::clearroot(),
        Commands::Clearcache => commands::cache::execute(),
        Commands::Root => commands::root::execute(),
        Commands::Version(args) => commands::version::execute(args),
        Commands::Changelist => commands::version::changelist(),
        Commands::Libs => commands::libs::list(),
        Commands::Cxxflags(args) => commands::libs::cxxflags(args),
        Commands::Ldflags(args) => commands::libs::ldflags(args),
        Commands::Cmakeflags(args) => commands::libs::cmakeflags(args),
        Commands::Includedirs(args) => commands::libs::includedirs(args),
        Commands::Libfiles(args) => commands::libs::libfiles(args),
        Commands::Defines(args) => commands::libs::defines(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
