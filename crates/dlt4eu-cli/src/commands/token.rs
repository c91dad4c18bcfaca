//! `dlt4eu token` — Generate an admin credential to access the API.
//!
//! This is the bootstrap path: the first administrator credential cannot be
//! self-issued through the service, so it is minted out-of-band here and
//! printed to standard output.

use clap::Args;
use std::path::PathBuf;

use dlt4eu_service::Handler;

use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Subject name recorded in the credential.
    pub subject: String,

    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "dlt4eu.toml")]
    pub config: PathBuf,
}

pub fn run(args: &TokenArgs) -> anyhow::Result<()> {
    let config = AppConfig::load(&args.config)?;
    let handler = Handler::new(config.service)?;
    let token = handler.admin_token(&args.subject)?;
    println!("{}", token);
    Ok(())
}
