//! registry-cache - Buildpack registry index cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use registry_cache::cli::{commands, Cli, Commands};
use registry_cache::config::{Config, ConfigManager};
use registry_cache::error::RegistryResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> RegistryResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let mut config = config_manager.load()?;
    if let Some(url) = cli.registry {
        config.registry.url = url;
    }
    if let Some(home) = cli.home {
        config.cache.home = Some(home);
    }

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.command {
        Commands::Locate(args) => commands::locate(args, &config),
        Commands::Refresh => commands::refresh(&config),
        Commands::Path => commands::path(&config),
        Commands::Config(args) => commands::config(args, &config, &config_manager),
    }
}

/// 0 = warn, 1 = info, 2+ = debug; logs go to stderr so stdout stays scriptable
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("registry_cache=warn"),
        1 => EnvFilter::new("registry_cache=info"),
        _ => EnvFilter::new("registry_cache=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).without_time().init();
    }
}
