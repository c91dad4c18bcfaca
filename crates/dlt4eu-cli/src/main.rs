//! dlt4eu — Digital identity platform command-line interface.
//!
//! Subcommands: init, token, server, status.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Digital identity platform for the DLT4EU project.
#[derive(Parser, Debug)]
#[command(name = "dlt4eu", version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file with a fresh signing key.
    Init(commands::init::InitArgs),
    /// Generate an admin credential to access the API.
    Token(commands::token::TokenArgs),
    /// Start an HTTP server instance to handle incoming requests.
    Server(commands::server::ServerArgs),
    /// Check whether a server instance is reachable.
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Token(args) => commands::token::run(args),
        Commands::Server(args) => commands::server::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
    }
}
