//! Model handles behind the clinical analysis components.

pub mod embeddings;
pub mod ner;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod sentiment;
pub mod summarize;
pub mod text;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::Settings;

use self::{embeddings::Embedder, ner::Ner, sentiment::SentimentModel, summarize::Summarizer};

/// Every model handle the application needs, loaded once per process.
#[derive(Clone)]
pub struct ModelSet {
    pub ner: Arc<dyn Ner>,
    pub sentiment: Arc<dyn SentimentModel>,
    pub summarizer: Arc<dyn Summarizer>,
    pub embedder: Arc<dyn Embedder>,
}

impl ModelSet {
    /// Load all configured backends. Any missing model aborts start-up.
    #[instrument(skip(settings))]
    pub fn load(settings: &Settings) -> Result<Self> {
        let ner = ner::load_model(settings).context("loading ner model")?;
        let sentiment = sentiment::load_model(settings).context("loading sentiment model")?;
        let summarizer = summarize::load_model(settings).context("loading summarization model")?;
        let embedder = embeddings::load_model().context("loading embedding model")?;
        info!("model set ready");
        Ok(Self {
            ner,
            sentiment,
            summarizer,
            embedder,
        })
    }

    /// Dependency-free backends, handy for tests and dry runs.
    pub fn lexical() -> Self {
        Self {
            ner: Arc::new(ner::DictionaryNer),
            sentiment: Arc::new(sentiment::LexiconSentiment),
            summarizer: Arc::new(summarize::ExtractiveSummarizer),
            embedder: Arc::new(embeddings::HashingEmbedder::default()),
        }
    }
}
