//! CLI entry-point for SOAP note generation.

use anyhow::Result;
use tracing::instrument;

use crate::{
    clinical::soap,
    cli::{emit, InputArgs},
    transcript,
};

#[instrument]
pub async fn run(args: InputArgs) -> Result<()> {
    let raw_text = args.read().await?;
    let note = soap::generate(&transcript::parse(&raw_text));
    emit(&note, args.pretty)
}
