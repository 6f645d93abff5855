//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{RegistryError, RegistryResult};

/// Execute the config command
pub fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> RegistryResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
    }
    Ok(())
}

fn show_config(config: &Config) -> RegistryResult<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| RegistryError::Internal(format!("serializing config: {e}")))?;
    println!("{}", toml);
    Ok(())
}
