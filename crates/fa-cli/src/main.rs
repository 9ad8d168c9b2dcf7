use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fa_cli::commands::{absent, merge, overtime, roster, scan};
use fa_cli::{Cli, Commands, Config, RosterAction};

/// Load config and build the file store, ensuring the base directory exists.
fn open_store(config_path: Option<&Path>) -> Result<fa_store::Store> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    std::fs::create_dir_all(&config.data_dir).context("failed to create data directory")?;

    Ok(fa_store::Store::new(&config.data_dir, config.roster_path()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Scan { token, date, time }) => {
            let store = open_store(cli.config.as_deref())?;
            scan::run(&store, token, *date, time)?;
        }
        Some(Commands::Merge { month }) => {
            let store = open_store(cli.config.as_deref())?;
            merge::run(&store, month)?;
        }
        Some(Commands::Overtime { date, json }) => {
            let store = open_store(cli.config.as_deref())?;
            overtime::run(&store, *date, *json)?;
        }
        Some(Commands::Absent { date, json }) => {
            let store = open_store(cli.config.as_deref())?;
            absent::run(&store, *date, *json)?;
        }
        Some(Commands::Roster { action }) => {
            let store = open_store(cli.config.as_deref())?;
            match action {
                RosterAction::Add {
                    id,
                    name,
                    mobile,
                    email,
                    token,
                } => roster::add(&store, id, name, mobile, email, token)?,
                RosterAction::List => roster::list(&store)?,
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
