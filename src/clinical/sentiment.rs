//! Patient sentiment mapped onto clinical labels.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::ModelResult,
    nlp::sentiment::{Polarity, SentimentModel, SentimentPrediction},
};

pub const DEFAULT_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClinicalSentiment {
    Anxious,
    Neutral,
    Reassured,
}

impl ClinicalSentiment {
    /// Confidence must strictly exceed `threshold` to leave `Neutral`.
    pub fn from_prediction(prediction: SentimentPrediction, threshold: f32) -> Self {
        match prediction.label {
            Polarity::Negative if prediction.score > threshold => Self::Anxious,
            Polarity::Positive if prediction.score > threshold => Self::Reassured,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anxious => "Anxious",
            Self::Neutral => "Neutral",
            Self::Reassured => "Reassured",
        }
    }
}

impl fmt::Display for ClinicalSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct PatientSentimentAnalyzer {
    model: Arc<dyn SentimentModel>,
    threshold: f32,
}

impl PatientSentimentAnalyzer {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self::with_threshold(model, DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(model: Arc<dyn SentimentModel>, threshold: f32) -> Self {
        Self { model, threshold }
    }

    /// One classification over all patient utterances joined by a space.
    #[instrument(skip_all, fields(utterances = patient_texts.len()))]
    pub fn analyze<S: AsRef<str>>(&self, patient_texts: &[S]) -> ModelResult<ClinicalSentiment> {
        if patient_texts.is_empty() {
            return Ok(ClinicalSentiment::Neutral);
        }
        let combined = patient_texts
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        let prediction = self.model.classify(&combined)?;
        let sentiment = ClinicalSentiment::from_prediction(prediction, self.threshold);
        debug!(label = %prediction.label, score = prediction.score, %sentiment, "classified sentiment");
        Ok(sentiment)
    }
}
