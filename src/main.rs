mod auth;
mod cli;
mod demo;
mod error;
mod insights;
mod metrics;
mod models;
mod narration;
mod providers;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting ShadowOps - CI Risk Insights Tool");
    cli.execute().await?;

    Ok(())
}
