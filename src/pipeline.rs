//! End-to-end transcript analysis.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    clinical::{
        entities::MedicalEntityExtractor,
        intent::{self, PatientIntent},
        report::{self, MedicalReport},
        sentiment::{ClinicalSentiment, PatientSentimentAnalyzer},
        summary::NarrativeSummarizer,
    },
    config::Settings,
    nlp::{summarize::GenerationParams, ModelSet},
    transcript,
};

/// Combined output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    #[serde(rename = "Medical_Summary")]
    pub medical_summary: MedicalReport,
    #[serde(rename = "Patient_Sentiment")]
    pub patient_sentiment: ClinicalSentiment,
    #[serde(rename = "Patient_Intent")]
    pub patient_intent: PatientIntent,
    #[serde(rename = "Narrative_Summary")]
    pub narrative_summary: String,
}

/// Report fields supplied by the caller rather than derived from the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
    pub patient_name: String,
    pub current_status: String,
    pub prognosis: String,
}

impl From<&Settings> for ReportFields {
    fn from(settings: &Settings) -> Self {
        Self {
            patient_name: settings.patient_name.clone(),
            current_status: settings.current_status.clone(),
            prognosis: settings.prognosis.clone(),
        }
    }
}

/// Components wired over a shared [`ModelSet`]. Cheap to clone.
#[derive(Clone)]
pub struct Pipeline {
    entities: MedicalEntityExtractor,
    sentiment: PatientSentimentAnalyzer,
    summarizer: NarrativeSummarizer,
    fields: ReportFields,
}

impl Pipeline {
    pub fn new(models: &ModelSet, settings: &Settings) -> Self {
        let params = GenerationParams {
            min_length: settings.summary_min_length,
            max_length: settings.summary_max_length,
            do_sample: false,
        };
        Self {
            entities: MedicalEntityExtractor::new(models.ner.clone()),
            sentiment: PatientSentimentAnalyzer::with_threshold(
                models.sentiment.clone(),
                settings.sentiment_threshold,
            ),
            summarizer: NarrativeSummarizer::with_params(models.summarizer.clone(), params),
            fields: ReportFields::from(settings),
        }
    }

    /// Override the caller-supplied report fields.
    pub fn with_report_fields(mut self, fields: ReportFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn report_fields(&self) -> &ReportFields {
        &self.fields
    }

    #[instrument(skip_all, fields(chars = raw_text.len()))]
    pub fn run(&self, raw_text: &str) -> Result<PipelineResult> {
        let dialogue = transcript::parse(raw_text);
        let patient_texts = transcript::patient_texts(&dialogue);
        let all_texts = transcript::all_texts(&dialogue);
        info!(
            turns = dialogue.len(),
            patient_turns = patient_texts.len(),
            "parsed dialogue"
        );

        let entities = self
            .entities
            .extract(&all_texts)
            .context("extracting medical entities")?;
        let sentiment = self
            .sentiment
            .analyze(&patient_texts)
            .context("classifying patient sentiment")?;
        let intent = intent::detect(&patient_texts);
        let narrative = self
            .summarizer
            .summarize(raw_text)
            .context("summarizing transcript")?;

        let medical_summary = report::build(
            &self.fields.patient_name,
            &entities,
            &self.fields.current_status,
            &self.fields.prognosis,
        );
        info!(%sentiment, %intent, "pipeline complete");

        Ok(PipelineResult {
            medical_summary,
            patient_sentiment: sentiment,
            patient_intent: intent,
            narrative_summary: narrative,
        })
    }
}

/// Convenience wrapper: build a [`Pipeline`] and run it once.
pub fn run_pipeline(models: &ModelSet, settings: &Settings, raw_text: &str) -> Result<PipelineResult> {
    Pipeline::new(models, settings).run(raw_text)
}
