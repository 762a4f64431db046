//! herodex server binary

use anyhow::anyhow;
use clap::Parser;
use herodex::{run_server, ServerArgs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))?;

    let args = ServerArgs::parse();
    run_server(args).await
}
