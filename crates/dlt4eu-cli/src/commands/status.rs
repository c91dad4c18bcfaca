//! `dlt4eu status` — Check whether a server instance is reachable.

use clap::Args;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the server.
    #[arg(short, long, default_value = "http://127.0.0.1:9090")]
    pub endpoint: String,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let url = format!("{}/ping", args.endpoint);
    let client = reqwest::Client::new();

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            println!("Server at {} is up", args.endpoint);
        }
        Ok(resp) => {
            anyhow::bail!("server responded with HTTP {}", resp.status());
        }
        Err(e) => {
            println!("Could not reach server at {}", args.endpoint);
            println!("  Error: {}", e);
        }
    }

    Ok(())
}
