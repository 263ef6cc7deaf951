//! CLI entry-point for keyphrase extraction.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    clinical::keywords::KeywordExtractor,
    cli::{emit, InputArgs},
    config::Settings,
    nlp::embeddings,
};

/// Args for the `keywords` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of keyphrases to return; defaults to KEYWORD_TOP_N.
    #[arg(long)]
    pub top_n: Option<usize>,
    /// Include similarity scores in the output.
    #[arg(long)]
    pub scores: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let text = args.input.read().await?;
    let top_n = args.top_n.unwrap_or(settings.keyword_top_n);
    let extractor =
        KeywordExtractor::new(embeddings::load_model().context("loading embedding model")?);

    let ranked = extractor.extract_scored(&text, top_n)?;
    info!(count = ranked.len(), top_n, "extracted keyphrases");
    if args.scores {
        emit(&ranked, args.input.pretty)
    } else {
        let phrases: Vec<&str> = ranked.iter().map(|k| k.phrase.as_str()).collect();
        emit(&phrases, args.input.pretty)
    }
}
