//! CLI entry-point for the transcript analysis HTTP API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api, config::Settings};

/// Bind address for the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address; keep on loopback unless fronted by a proxy.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;
    api::serve(settings, addr).await
}
