//! Casaval CLI - Command-line interface for training and serving the housing model.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use casaval_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("casaval=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(cmd) => cmd.run().await?,
        Commands::Serve(cmd) => cmd.run().await?,
    }

    info!("Done");
    Ok(())
}
