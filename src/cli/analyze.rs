//! CLI entry-point for the full report pipeline.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::{emit, InputArgs},
    config::Settings,
    nlp::ModelSet,
    pipeline::{Pipeline, ReportFields},
};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub input: InputArgs,
    /// Patient name recorded in the report.
    #[arg(long)]
    pub patient_name: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let raw_text = args.input.read().await?;
    let models = ModelSet::load(&settings)?;

    let mut fields = ReportFields::from(&settings);
    if let Some(name) = args.patient_name {
        fields.patient_name = name;
    }
    let pipeline = Pipeline::new(&models, &settings).with_report_fields(fields);

    let result = pipeline.run(&raw_text)?;
    info!(
        sentiment = %result.patient_sentiment,
        intent = %result.patient_intent,
        "analysis finished"
    );
    emit(&result, args.input.pretty)
}
