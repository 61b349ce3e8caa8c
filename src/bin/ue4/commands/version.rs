//! `ue4 version` and `ue4 changelist` commands

use anyhow::Result;

use crate::cli::VersionArgs;
use crate::commands::open_engine;
use ue4cli::core::VersionFormat;

pub fn execute(args: VersionArgs) -> Result<()> {
    let format: VersionFormat = args.format.parse()?;
    let engine = open_engine()?;

    println!("{}", engine.version_string(format));
    Ok(())
}

pub fn changelist() -> Result<()> {
    let engine = open_engine()?;

    println!("{}", engine.changelist());
    Ok(())
}
