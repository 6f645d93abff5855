//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// registry-cache - Buildpack registry index cache
///
/// Resolves `namespace/name[@version]` to a digest-pinned image address
/// using a local, self-healing mirror of the registry index.
#[derive(Parser, Debug)]
#[command(name = "registry-cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REGISTRY_CACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Registry index URL (overrides config)
    #[arg(long, global = true)]
    pub registry: Option<String>,

    /// Cache home directory (overrides config)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a buildpack to its image address
    Locate(LocateArgs),

    /// Create, repair and update the registry mirror
    Refresh,

    /// Print the mirror directory for the configured registry
    Path,

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Buildpack ID: <namespace>/<name>[@<version>]
    pub buildpack: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Skip digest validation of the resolved address
    #[arg(long)]
    pub no_validate: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,

    /// Show configuration file path
    Path,
}

/// Output format for locate
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Image address only
    Text,
    /// Full index entry as JSON
    Json,
}
