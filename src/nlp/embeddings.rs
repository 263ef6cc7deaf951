//! Sentence embedding handles used for keyphrase ranking.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tracing::info;

#[cfg(feature = "embeddings")]
use std::sync::Mutex;

#[cfg(feature = "embeddings")]
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::{error::ModelResult, nlp::text};

#[cfg(feature = "embeddings")]
use crate::error::ModelError;

/// Trait for text embedding backends.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> ModelResult<Vec<Vec<f32>>>;
}

/// Feature-hashed bag of words, L2-normalised.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dims: usize,
}

impl HashingEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    fn embed_one(&self, input: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dims];
        for word in text::words(input) {
            if text::is_stop_word(&word) {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let idx = (hasher.finish() % self.dims as u64) as usize;
            vector[idx] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, texts: &[&str]) -> ModelResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// MiniLM sentence embeddings via fastembed.
#[cfg(feature = "embeddings")]
pub struct MiniLmEmbedder {
    model: Mutex<TextEmbedding>,
}

#[cfg(feature = "embeddings")]
impl MiniLmEmbedder {
    pub fn load() -> ModelResult<Self> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|e| ModelError::unavailable("embedding", e))?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

#[cfg(feature = "embeddings")]
impl Embedder for MiniLmEmbedder {
    fn embed(&self, texts: &[&str]) -> ModelResult<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| ModelError::inference("embedding", "model lock poisoned"))?;
        model
            .embed(texts.to_vec(), None)
            .map_err(|e| ModelError::inference("embedding", e))
    }
}

/// Cosine similarity; zero when either vector has no magnitude.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Load the configured embedding backend.
pub fn load_model() -> ModelResult<Arc<dyn Embedder>> {
    #[cfg(feature = "embeddings")]
    {
        let model = MiniLmEmbedder::load()?;
        info!("loaded all-MiniLM-L6-v2 embeddings");
        Ok(Arc::new(model) as Arc<dyn Embedder>)
    }

    #[cfg(not(feature = "embeddings"))]
    {
        info!("using hashing embeddings");
        Ok(Arc::new(HashingEmbedder::default()) as Arc<dyn Embedder>)
    }
}
