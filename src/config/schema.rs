//! Configuration schema for registry-cache
//!
//! Configuration is stored at `~/.config/registry-cache/config.toml`

use crate::cache::{LocatorConfig, DEFAULT_REGISTRY_DIR, DEFAULT_REGISTRY_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Registry index settings
    pub registry: RegistryConfig,

    /// Cache settings
    pub cache: CacheConfig,
}

impl Config {
    /// Directory holding the registry mirrors
    pub fn cache_home(&self) -> PathBuf {
        self.cache.home.clone().unwrap_or_else(default_cache_home)
    }

    /// Mirror naming derived from this configuration
    pub fn locator(&self) -> LocatorConfig {
        LocatorConfig {
            default_url: self.registry.url.clone(),
            dir_prefix: self.cache.dir_prefix.clone(),
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Registry index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Git URL of the registry index
    pub url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the mirrors (default: platform cache dir)
    pub home: Option<PathBuf>,

    /// Prefix of each mirror directory name
    pub dir_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            home: None,
            dir_prefix: DEFAULT_REGISTRY_DIR.to_string(),
        }
    }
}

fn default_cache_home() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("registry-cache")
}
