//! `ue4 root`, `ue4 setroot` and `ue4 clearroot` commands

use anyhow::Result;

use crate::cli::SetrootArgs;
use ue4cli::ops::{clear_root, engine_root, set_root};
use ue4cli::platform;
use ue4cli::util::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    let host = platform::host();
    let root = engine_root(&ctx.config(), host.as_ref())?;

    println!("{}", root.display());
    Ok(())
}

pub fn setroot(args: SetrootArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let root = set_root(&ctx, &args.dir)?;

    println!("Set engine root path override: {}", root.display());
    Ok(())
}

pub fn clearroot() -> Result<()> {
    let ctx = GlobalContext::new()?;
    clear_root(&ctx)
}
