//! Command-line interface wiring for medscribe.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::config::Settings;

pub mod analyze;
pub mod keywords;
pub mod parse;
pub mod serve;
pub mod soap;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Clinical transcript structuring assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Parse(args) => parse::run(args).await,
            Commands::Soap(args) => soap::run(args).await,
            Commands::Keywords(args) => keywords::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full report pipeline over a transcript.
    Analyze(analyze::Args),
    /// Print the speaker-tagged dialogue turns.
    Parse(InputArgs),
    /// Generate a SOAP note from the dialogue.
    Soap(InputArgs),
    /// Extract top-ranked keyphrases.
    Keywords(keywords::Args),
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Transcript source and output formatting shared by most commands.
#[derive(Debug, Clone, ClapArgs)]
pub struct InputArgs {
    /// Transcript file; reads stdin when omitted.
    #[arg(long, short)]
    pub input: Option<PathBuf>,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl InputArgs {
    pub async fn read(&self) -> Result<String> {
        match &self.input {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading transcript {}", path.display())),
            None => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("reading transcript from stdin")?;
                Ok(buf)
            }
        }
    }
}

/// Write `value` to stdout as JSON.
pub fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
