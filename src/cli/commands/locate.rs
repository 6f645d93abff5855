//! Locate command - resolve a buildpack to its image address

use crate::cli::args::{LocateArgs, OutputFormat};
use crate::config::Config;
use crate::error::{RegistryResult, ResultExt};
use crate::index::Buildpack;

/// Execute the locate command
pub fn execute(args: LocateArgs, config: &Config) -> RegistryResult<()> {
    let cache = super::open_cache(config)?;
    let buildpack = cache.locate_buildpack(&args.buildpack)?;

    if !args.no_validate {
        buildpack
            .validate()
            .with_context(|| format!("validating {}", args.buildpack))?;
    }

    match args.format {
        OutputFormat::Text => println!("{}", buildpack.address),
        OutputFormat::Json => print_json(&buildpack)?,
    }

    Ok(())
}

fn print_json(buildpack: &Buildpack) -> RegistryResult<()> {
    println!("{}", serde_json::to_string_pretty(buildpack)?);
    Ok(())
}
