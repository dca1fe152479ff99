//! Repledger CLI: drive a local reputation ledger from the command line.
//!
//! Subcommands: init, replay.

mod batch;
mod commands;
mod config;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::CliConfig;

/// Repledger, a weighted reputation ledger for registered DApps.
#[derive(Parser, Debug)]
#[command(name = "repledger", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "repledger.toml", global = true)]
    config: PathBuf,

    /// Override the owner principal.
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Replay a JSON transaction batch against a fresh ledger.
    Replay(commands::replay::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref owner) = cli.owner {
        config.ledger.owner = Some(owner.clone());
    }

    logging::init(&config.logging)?;
    tracing::debug!(path = %cli.config.display(), "configuration loaded");

    match &cli.command {
        Commands::Init(args) => commands::init::run(&cli.config, cli.owner.as_deref(), args),
        Commands::Replay(args) => {
            commands::replay::run(config.ledger_config()?, &config.clock, args)
        }
    }
}
