//! `dlt4eu init` — Write a default configuration file with a fresh
//! service signing key.

use clap::Args;
use std::path::PathBuf;

use dlt4eu_service::Config as ServiceConfig;

use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to write the configuration file (TOML).
    #[arg(short, long, default_value = "dlt4eu.toml")]
    pub config: PathBuf,

    /// Issuer identity recorded in every credential.
    #[arg(long, default_value = "dlt4eu")]
    pub issuer: String,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    if args.config.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            args.config.display()
        );
    }

    let config = AppConfig {
        service: ServiceConfig::with_new_key(args.issuer.clone())?,
        ..AppConfig::default()
    };
    config.save(&args.config)?;

    println!("Configuration written to {}", args.config.display());
    println!("  Issuer: {}", config.service.issuer);
    Ok(())
}
