//! Bucketing of NER spans into clinical categories.

use std::{collections::BTreeSet, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ModelResult, nlp::ner::Ner};

/// Prognosis text appended whenever an utterance talks about recovering.
pub const RECOVERY_PROGNOSIS: &str = "Full recovery expected";

const RECOVERY_CUES: &[&str] = &["recover", "full recovery"];

/// Fixed clinical categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityCategory {
    Symptoms,
    Diagnosis,
    Treatment,
    Prognosis,
}

impl EntityCategory {
    pub const ALL: [Self; 4] = [
        Self::Symptoms,
        Self::Diagnosis,
        Self::Treatment,
        Self::Prognosis,
    ];

    /// Map an NER label onto a category; unmapped labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "SYMPTOM" => Some(Self::Symptoms),
            "DISEASE" => Some(Self::Diagnosis),
            "TREATMENT" | "PROCEDURE" => Some(Self::Treatment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symptoms => "Symptoms",
            Self::Diagnosis => "Diagnosis",
            Self::Treatment => "Treatment",
            Self::Prognosis => "Prognosis",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category → de-duplicated spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBuckets {
    #[serde(rename = "Symptoms")]
    pub symptoms: BTreeSet<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: BTreeSet<String>,
    #[serde(rename = "Treatment")]
    pub treatment: BTreeSet<String>,
    #[serde(rename = "Prognosis")]
    pub prognosis: BTreeSet<String>,
}

impl EntityBuckets {
    pub fn get(&self, category: EntityCategory) -> &BTreeSet<String> {
        match category {
            EntityCategory::Symptoms => &self.symptoms,
            EntityCategory::Diagnosis => &self.diagnosis,
            EntityCategory::Treatment => &self.treatment,
            EntityCategory::Prognosis => &self.prognosis,
        }
    }

    fn get_mut(&mut self, category: EntityCategory) -> &mut BTreeSet<String> {
        match category {
            EntityCategory::Symptoms => &mut self.symptoms,
            EntityCategory::Diagnosis => &mut self.diagnosis,
            EntityCategory::Treatment => &mut self.treatment,
            EntityCategory::Prognosis => &mut self.prognosis,
        }
    }

    /// Returns `false` when the span was already present.
    pub fn insert(&mut self, category: EntityCategory, text: impl Into<String>) -> bool {
        self.get_mut(category).insert(text.into())
    }

    pub fn list(&self, category: EntityCategory) -> Vec<String> {
        self.get(category).iter().cloned().collect()
    }
}

/// True when the utterance mentions recovery.
pub fn mentions_recovery(text: &str) -> bool {
    let lower = text.to_lowercase();
    RECOVERY_CUES.iter().any(|cue| lower.contains(cue))
}

/// Runs the NER handle over utterances and buckets the results.
#[derive(Clone)]
pub struct MedicalEntityExtractor {
    ner: Arc<dyn Ner>,
}

impl MedicalEntityExtractor {
    pub fn new(ner: Arc<dyn Ner>) -> Self {
        Self { ner }
    }

    #[instrument(skip_all, fields(utterances = texts.len()))]
    pub fn extract<S: AsRef<str>>(&self, texts: &[S]) -> ModelResult<EntityBuckets> {
        let mut buckets = EntityBuckets::default();
        let mut discarded = 0usize;

        for text in texts {
            let text = text.as_ref();
            for span in self.ner.extract(text)? {
                match EntityCategory::from_label(&span.label) {
                    Some(category) => {
                        buckets.insert(category, span.text);
                    }
                    None => discarded += 1,
                }
            }
            if mentions_recovery(text) {
                buckets.insert(EntityCategory::Prognosis, RECOVERY_PROGNOSIS);
            }
        }

        for category in EntityCategory::ALL {
            debug!(%category, count = buckets.get(category).len(), "bucketed entities");
        }
        debug!(discarded, "dropped unmapped entity labels");
        Ok(buckets)
    }
}
