//! Narrative summary of the raw transcript.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    error::ModelResult,
    nlp::summarize::{GenerationParams, Summarizer},
};

#[derive(Clone)]
pub struct NarrativeSummarizer {
    model: Arc<dyn Summarizer>,
    params: GenerationParams,
}

impl NarrativeSummarizer {
    pub fn new(model: Arc<dyn Summarizer>) -> Self {
        Self::with_params(model, GenerationParams::default())
    }

    pub fn with_params(model: Arc<dyn Summarizer>, params: GenerationParams) -> Self {
        Self { model, params }
    }

    /// Single call over the whole transcript; long inputs are not chunked.
    #[instrument(skip_all, fields(chars = raw_text.len()))]
    pub fn summarize(&self, raw_text: &str) -> ModelResult<String> {
        let summary = self.model.summarize(raw_text, &self.params)?;
        info!(chars = summary.len(), "generated narrative summary");
        Ok(summary)
    }
}
