//! CLI entry-point for inspecting parsed dialogue turns.

use anyhow::Result;
use tracing::{info, instrument};

use crate::{
    cli::{emit, InputArgs},
    transcript,
};

#[instrument]
pub async fn run(args: InputArgs) -> Result<()> {
    let raw_text = args.read().await?;
    let dialogue = transcript::parse(&raw_text);
    info!(turns = dialogue.len(), "parsed transcript");
    emit(&dialogue, args.pretty)
}
