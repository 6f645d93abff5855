//! CLI command implementations

pub mod config;
pub mod locate;
pub mod path;
pub mod refresh;

pub use config::execute as config;
pub use locate::execute as locate;
pub use path::execute as path;
pub use refresh::execute as refresh;

use crate::config::Config;
use crate::error::{RegistryError, RegistryResult};
use crate::git::GitCli;
use crate::registry::RegistryCache;
use std::fs;
use tracing::debug;

/// Open the cache for the configured registry
///
/// Only the default home is created; an explicit home must already exist.
fn open_cache(config: &Config) -> RegistryResult<RegistryCache> {
    let home = config.cache_home();
    if config.cache.home.is_none() {
        fs::create_dir_all(&home).map_err(|e| {
            RegistryError::io(format!("creating cache home {}", home.display()), e)
        })?;
    }
    debug!("Cache home: {}", home.display());

    RegistryCache::with_config(
        &config.locator(),
        &home,
        &config.registry.url,
        Box::new(GitCli::new()),
    )
}
