use anyhow::Context;
use clap::Parser;
use tracing::Level;

use docserver::cli::Cli;
use docserver::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.into_config().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cfg.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let settings = cfg.resolve().context("invalid configuration")?;

    tokio::select! {
        res = server::run(&settings) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
