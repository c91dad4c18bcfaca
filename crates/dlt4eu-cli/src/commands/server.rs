//! `dlt4eu server` — Start an HTTP server instance to handle incoming
//! requests.

use clap::Args;
use std::path::PathBuf;

use dlt4eu_service::{api, Handler};

use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "dlt4eu.toml")]
    pub config: PathBuf,

    /// Override the HTTP port.
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn run(args: &ServerArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    let listen_addr = config.http_addr()?;

    let handler = Handler::new(config.service)?;
    tracing::info!(
        "dlt4eu v{} waiting for requests on http://{}",
        env!("CARGO_PKG_VERSION"),
        listen_addr
    );

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
        tracing::info!("received shutdown signal");
    };

    tokio::select! {
        result = api::start_server(listen_addr, handler.resolver()) => {
            result?;
        }
        _ = shutdown => {
            tracing::info!("closing server");
        }
    }

    handler.shutdown();
    Ok(())
}
