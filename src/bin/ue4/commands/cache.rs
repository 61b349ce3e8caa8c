//! `ue4 clearcache` command

use anyhow::Result;

use ue4cli::ops::clear_cache;
use ue4cli::util::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    clear_cache(&ctx)?;

    tracing::info!("Cleared cache at {}", ctx.cache_dir().display());
    Ok(())
}
