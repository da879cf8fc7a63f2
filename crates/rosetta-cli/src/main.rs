//! Rosetta command line entry point.

use anyhow::Result;
use clap::Parser;
use rosetta_cli::{bootstrap_subscriber, init_logging, load_config, resolve, Args};
use tracing::instrument::WithSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)
        .with_subscriber(bootstrap_subscriber(&args, std::io::stderr))
        .await?;
    init_logging(&config.logging)?;

    let message = resolve(&args, &config).await?;
    println!("{message}");

    Ok(())
}
