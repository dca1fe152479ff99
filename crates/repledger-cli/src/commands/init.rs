//! `repledger init`: write a default configuration file.

use clap::Args;
use std::path::Path;

use repledger_core::Principal;

use crate::config::CliConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// `owner` comes from the global `--owner` flag and is required here.
pub fn run(config_path: &Path, owner: Option<&str>, args: &InitArgs) -> anyhow::Result<()> {
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            config_path.display()
        );
    }
    let owner = owner.ok_or_else(|| anyhow::anyhow!("init requires --owner <PRINCIPAL>"))?;
    let owner = Principal::new(owner)?;

    let mut config = CliConfig::default();
    config.ledger.owner = Some(owner.to_string());
    config.save(config_path)?;

    tracing::info!(path = %config_path.display(), owner = %owner, "wrote default config");
    println!("Wrote {}", config_path.display());
    Ok(())
}
