//! Path command - print the mirror directory

use crate::config::Config;
use crate::error::RegistryResult;

/// Execute the path command
pub fn execute(config: &Config) -> RegistryResult<()> {
    let cache = super::open_cache(config)?;
    println!("{}", cache.handle().root().display());
    Ok(())
}
