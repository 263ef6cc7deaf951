//! Entry point wiring CLI dispatch to the analysis pipeline.

use anyhow::Result;
use medscribe::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;
    logging::init_tracing(settings.log_format)?;

    info!(?cli, models_dir = %settings.models_dir.display(), "starting command");
    cli.dispatch(settings).await
}
