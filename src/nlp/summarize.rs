//! Abstractive summarization handles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::Settings,
    error::{ModelError, ModelResult},
    nlp::text,
};

/// Decoding bounds passed with every summarization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub min_length: usize,
    pub max_length: usize,
    /// `false` selects greedy decoding.
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            min_length: 60,
            max_length: 180,
            do_sample: false,
        }
    }
}

/// Trait for summarization backends.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, params: &GenerationParams) -> ModelResult<String>;
}

/// Lead-sentence summarizer used when no generative model is compiled in.
///
/// Takes whole sentences until `min_length` words are covered and never emits
/// more than `max_length` words.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractiveSummarizer;

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, input: &str, params: &GenerationParams) -> ModelResult<String> {
        if params.min_length > params.max_length {
            return Err(ModelError::Config(format!(
                "min_length {} exceeds max_length {}",
                params.min_length, params.max_length
            )));
        }
        let mut words: Vec<&str> = Vec::new();
        let sentences = text::split_sentences(input);
        for sentence in &sentences {
            if words.len() >= params.min_length {
                break;
            }
            words.extend(sentence.split_whitespace());
        }
        words.truncate(params.max_length);
        debug!(
            sentences = sentences.len(),
            words = words.len(),
            "built extractive summary"
        );
        Ok(words.join(" "))
    }
}

#[cfg(feature = "summaries")]
pub use llama::LlamaSummarizer;

#[cfg(feature = "summaries")]
mod llama {
    use std::{path::Path, sync::Mutex};

    use llama_cpp_rs::{
        options::{ModelOptions, PredictOptions},
        LLama,
    };

    use super::{GenerationParams, Summarizer};
    use crate::error::{ModelError, ModelResult};

    /// GGUF model driven through llama.cpp.
    pub struct LlamaSummarizer {
        model: Mutex<LLama>,
    }

    impl LlamaSummarizer {
        pub fn load(path: &Path) -> ModelResult<Self> {
            if !path.exists() {
                return Err(ModelError::unavailable(
                    "summarizer",
                    format!("expected model {} not found", path.display()),
                ));
            }
            let options = ModelOptions::default();
            let model = LLama::new(path.display().to_string(), &options)
                .map_err(|e| ModelError::unavailable("summarizer", e))?;
            Ok(Self {
                model: Mutex::new(model),
            })
        }
    }

    impl Summarizer for LlamaSummarizer {
        fn summarize(&self, text: &str, params: &GenerationParams) -> ModelResult<String> {
            let prompt = format!(
                "Summarise the following physician-patient conversation in at least {} and at most {} words.\n\n{text}\n\nSummary:",
                params.min_length, params.max_length
            );
            let options = PredictOptions {
                tokens: params.max_length as i32,
                temperature: if params.do_sample { 0.8 } else { 0.0 },
                top_k: if params.do_sample { 40 } else { 1 },
                ..Default::default()
            };
            let model = self
                .model
                .lock()
                .map_err(|_| ModelError::inference("summarizer", "model lock poisoned"))?;
            let output = model
                .predict(prompt, options)
                .map_err(|e| ModelError::inference("summarizer", e))?;
            Ok(output.trim().to_string())
        }
    }
}

/// Load the configured summarization backend.
pub fn load_model(settings: &Settings) -> ModelResult<Arc<dyn Summarizer>> {
    #[cfg(feature = "summaries")]
    {
        let path = settings.join_model("summarizer/model.gguf");
        let model = LlamaSummarizer::load(&path)?;
        info!(path = %path.display(), "loaded llama summarizer");
        Ok(Arc::new(model) as Arc<dyn Summarizer>)
    }

    #[cfg(not(feature = "summaries"))]
    {
        let _ = settings;
        info!("using extractive summarizer");
        Ok(Arc::new(ExtractiveSummarizer) as Arc<dyn Summarizer>)
    }
}
