//! Refresh command - create, repair and update the mirror

use crate::config::Config;
use crate::error::RegistryResult;
use console::style;

/// Execute the refresh command
pub fn execute(config: &Config) -> RegistryResult<()> {
    let cache = super::open_cache(config)?;
    cache.refresh()?;

    println!(
        "{} {} ({})",
        style("Registry cache ready:").green(),
        cache.handle().root().display(),
        style(cache.handle().url()).dim()
    );
    Ok(())
}
