//! get-workflow-version CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use get_workflow_version::{
    cli::Cli,
    env::{GH_TOKEN, GITHUB_OUTPUT},
    framework::Retrier,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so that stdout only carries the result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    cli.execute(GH_TOKEN.clone(), GITHUB_OUTPUT.as_deref(), Retrier::default())
        .await?;

    Ok(())
}
