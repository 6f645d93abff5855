//! Cache location derived from the registry URL
//!
//! Each registry URL gets its own mirror directory under the home directory,
//! named after the SHA256 of the URL. Same URL = same directory, so caches
//! for different registries coexist without a lookup table.

use crate::error::{RegistryError, RegistryResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Registry index used when none is configured
pub const DEFAULT_REGISTRY_URL: &str = "https://github.com/buildpacks/registry-index";

/// Prefix of every mirror directory name
pub const DEFAULT_REGISTRY_DIR: &str = "registry";

/// Naming defaults for cache directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Registry URL bound by [`LocatorConfig::locate_default`]
    pub default_url: String,
    /// Prefix of the mirror directory name
    pub dir_prefix: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_REGISTRY_URL.to_string(),
            dir_prefix: DEFAULT_REGISTRY_DIR.to_string(),
        }
    }
}

impl LocatorConfig {
    /// Derive the cache handle for `registry_url` under `home`
    ///
    /// `home` must already exist.
    pub fn locate(&self, home: &Path, registry_url: &str) -> RegistryResult<CacheHandle> {
        fs::metadata(home).map_err(|e| RegistryError::HomeNotFound {
            path: home.to_path_buf(),
            source: e,
        })?;

        let root = home.join(format!("{}-{}", self.dir_prefix, url_key(registry_url)));
        debug!("Registry cache for {}: {}", registry_url, root.display());

        Ok(CacheHandle {
            url: registry_url.to_string(),
            root,
        })
    }

    /// Derive the cache handle for the default registry
    pub fn locate_default(&self, home: &Path) -> RegistryResult<CacheHandle> {
        self.locate(home, &self.default_url)
    }
}

/// Identifies one registry cache on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHandle {
    url: String,
    root: PathBuf,
}

impl CacheHandle {
    /// Registry URL the mirror must track
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Mirror working tree root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Derive the cache handle for `registry_url` with default naming
pub fn locate(home: &Path, registry_url: &str) -> RegistryResult<CacheHandle> {
    LocatorConfig::default().locate(home, registry_url)
}

/// Derive the cache handle for the default registry
pub fn locate_default(home: &Path) -> RegistryResult<CacheHandle> {
    LocatorConfig::default().locate_default(home)
}

/// Full SHA256 of the URL as lowercase hex
fn url_key(registry_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(registry_url.as_bytes());
    hex::encode(hasher.finalize())
}
