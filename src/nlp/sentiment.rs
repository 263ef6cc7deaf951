//! Binary sentiment classification handles.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::Settings,
    error::{ModelError, ModelResult},
    nlp::text,
};

/// Polarity labels emitted by SST-2 style classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Polarity {
    Negative,
    Positive,
}

impl Polarity {
    pub fn from_label(label: &str) -> ModelResult<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "NEGATIVE" | "NEG" | "LABEL_0" => Ok(Self::Negative),
            "POSITIVE" | "POS" | "LABEL_1" => Ok(Self::Positive),
            other => Err(ModelError::inference(
                "sentiment",
                format!("unexpected label {other}"),
            )),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("NEGATIVE"),
            Self::Positive => f.write_str("POSITIVE"),
        }
    }
}

/// Top-1 prediction: label plus softmax confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: Polarity,
    pub score: f32,
}

/// Trait for sentiment classifiers.
pub trait SentimentModel: Send + Sync {
    fn classify(&self, text: &str) -> ModelResult<SentimentPrediction>;
}

const POSITIVE_CUES: &[&str] = &[
    "better", "good", "great", "fine", "relieved", "relief", "thank", "thanks", "glad", "happy",
    "improving", "improved", "recover", "recovery", "reassuring", "hopeful", "okay", "ok",
    "appreciate", "nice",
];

const NEGATIVE_CUES: &[&str] = &[
    "worried", "worry", "concerned", "afraid", "scared", "anxious", "nervous", "pain", "hurt",
    "hurts", "bad", "worse", "terrible", "awful", "difficult", "struggle", "struggling", "shock",
    "upset", "unable",
];

/// Cue-word polarity scorer with add-one smoothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl SentimentModel for LexiconSentiment {
    fn classify(&self, input: &str) -> ModelResult<SentimentPrediction> {
        let (mut positive, mut negative) = (0usize, 0usize);
        for word in text::words(input) {
            if POSITIVE_CUES.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_CUES.contains(&word.as_str()) {
                negative += 1;
            }
        }
        let total = (positive + negative + 2) as f32;
        let prediction = if negative > positive {
            SentimentPrediction {
                label: Polarity::Negative,
                score: (negative + 1) as f32 / total,
            }
        } else {
            SentimentPrediction {
                label: Polarity::Positive,
                score: (positive + 1) as f32 / total,
            }
        };
        Ok(prediction)
    }
}

/// Load the configured sentiment backend.
pub fn load_model(settings: &Settings) -> ModelResult<Arc<dyn SentimentModel>> {
    #[cfg(feature = "onnx")]
    {
        let dir = settings.join_model("sentiment");
        let model = super::onnx::SequenceClassifier::load(&dir)?;
        info!(path = %dir.display(), "loaded onnx sentiment model");
        Ok(Arc::new(model) as Arc<dyn SentimentModel>)
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = settings;
        info!("using lexicon sentiment model");
        Ok(Arc::new(LexiconSentiment) as Arc<dyn SentimentModel>)
    }
}
