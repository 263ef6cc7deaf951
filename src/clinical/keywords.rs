//! Embedding-ranked keyphrase extraction.

use std::{cmp::Ordering, sync::Arc};

use indexmap::IndexSet;
use tracing::{debug, instrument};

use crate::{
    error::{ModelError, ModelResult},
    nlp::{
        embeddings::{cosine, Embedder},
        text,
    },
};

pub const DEFAULT_TOP_N: usize = 10;
const MAX_NGRAM: usize = 3;

/// A candidate phrase and its similarity to the whole document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Keyphrase {
    pub phrase: String,
    pub score: f32,
}

#[derive(Clone)]
pub struct KeywordExtractor {
    embedder: Arc<dyn Embedder>,
}

impl KeywordExtractor {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Up to `top_n` phrases, best first.
    pub fn extract(&self, text: &str, top_n: usize) -> ModelResult<Vec<String>> {
        Ok(self
            .extract_scored(text, top_n)?
            .into_iter()
            .map(|k| k.phrase)
            .collect())
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn extract_scored(&self, text: &str, top_n: usize) -> ModelResult<Vec<Keyphrase>> {
        let candidates = candidate_phrases(text);
        if candidates.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let mut inputs: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        inputs.push(text);
        inputs.extend(candidates.iter().map(String::as_str));
        let vectors = self.embedder.embed(&inputs)?;
        let Some((document, phrases)) = vectors.split_first() else {
            return Err(ModelError::inference("embedding", "no vectors returned"));
        };
        if phrases.len() != candidates.len() {
            return Err(ModelError::inference(
                "embedding",
                format!(
                    "expected {} vectors, got {}",
                    candidates.len() + 1,
                    vectors.len()
                ),
            ));
        }

        let mut ranked: Vec<Keyphrase> = candidates
            .into_iter()
            .zip(phrases)
            .map(|(phrase, vector)| Keyphrase {
                score: cosine(document, vector),
                phrase,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(top_n);
        debug!(keyphrases = ranked.len(), "ranked keyphrases");
        Ok(ranked)
    }
}

/// Distinct 1–3 word n-grams over the stop-word-filtered token stream.
pub fn candidate_phrases(input: &str) -> Vec<String> {
    let tokens: Vec<String> = text::words(input)
        .into_iter()
        .filter(|w| w.chars().count() >= 2 && !text::is_stop_word(w))
        .collect();

    let mut candidates = IndexSet::new();
    for n in 1..=MAX_NGRAM {
        for window in tokens.windows(n) {
            candidates.insert(window.join(" "));
        }
    }
    candidates.into_iter().collect()
}
