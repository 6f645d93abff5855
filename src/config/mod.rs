//! Configuration management for registry-cache

pub mod schema;

pub use schema::Config;

use crate::error::{RegistryError, RegistryResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the registry URL
pub const ENV_REGISTRY_URL: &str = "REGISTRY_CACHE_URL";

/// Overrides the cache home directory
pub const ENV_CACHE_HOME: &str = "REGISTRY_CACHE_HOME";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("registry-cache")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub fn load(&self) -> RegistryResult<Config> {
        let mut config = if self.config_path.exists() {
            self.load_from_file(&self.config_path)?
        } else {
            debug!("Config file not found, using defaults");
            Config::default()
        };

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, path: &Path) -> RegistryResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| RegistryError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| RegistryError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply `REGISTRY_CACHE_*` environment variables
    pub fn apply_env_overrides(config: &mut Config) {
        if let Some(url) = env::var(ENV_REGISTRY_URL).ok().filter(|v| !v.is_empty()) {
            debug!("Registry URL from {}: {}", ENV_REGISTRY_URL, url);
            config.registry.url = url;
        }
        if let Some(home) = env::var_os(ENV_CACHE_HOME).filter(|v| !v.is_empty()) {
            config.cache.home = Some(PathBuf::from(home));
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_REGISTRY_URL;
    use crate::error::ErrorKind;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var(ENV_REGISTRY_URL);
        env::remove_var(ENV_CACHE_HOME);
    }

    #[test]
    #[serial]
    fn load_default_when_missing() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nonexistent.toml"));

        let config = manager.load().unwrap();
        assert_eq!(config.registry.url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    #[serial]
    fn load_from_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[registry]\nurl = \"https://example.com/index\"\n",
        )
        .unwrap();

        let config = ConfigManager::with_path(path).load().unwrap();
        assert_eq!(config.registry.url, "https://example.com/index");
    }

    #[test]
    #[serial]
    fn invalid_file_is_configuration_error() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[registry\nurl = ").unwrap();

        let err = ConfigManager::with_path(path).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[registry]\nurl = \"https://example.com/index\"\n").unwrap();

        env::set_var(ENV_REGISTRY_URL, "https://example.com/override");
        env::set_var(ENV_CACHE_HOME, temp.path());
        let config = ConfigManager::with_path(path).load().unwrap();
        clear_env();

        assert_eq!(config.registry.url, "https://example.com/override");
        assert_eq!(config.cache_home(), temp.path());
    }
}
