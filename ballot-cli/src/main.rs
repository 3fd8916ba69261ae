mod cli;
mod commands;
mod error;

use std::io::{self, Write as _};

use ballot_config::{get_config_from, Config};
use ballot_storage::FileStore;
use ballot_telemetry::setup_telemetry;
use clap::Parser as _;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

fn configure(cli: &Cli) -> Result<Config, CliError> {
    let mut config = get_config_from(&cli.config)?;
    if let Some(data_dir) = &cli.data_dir {
        data_dir.clone_into(&mut config.data_dir);
    }
    if let Some(teams) = &cli.teams {
        teams.clone_into(&mut config.teams);
    }
    if let Some(cocktails) = &cli.cocktails {
        cocktails.clone_into(&mut config.cocktails);
    }
    Ok(config)
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = configure(&cli)?;
    setup_telemetry(&config.log)?;
    debug!(?config, "loaded configuration");

    let mut store = FileStore::new(&config.data_dir);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &config, &mut store, &mut out)?;
    out.flush()?;
    Ok(())
}
