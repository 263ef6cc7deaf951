//! Biomedical named-entity recognition handles.
//!
//! The default backend is a clinical lexicon matcher; the `onnx` feature swaps
//! in a token-classification model exported from a biomedical transformer.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::info;

use crate::{config::Settings, error::ModelResult};

/// Extracted entity span with byte offsets relative to the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub text: String,
    pub score: f64,
}

/// Trait for NER implementations.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str) -> ModelResult<Vec<Span>>;
}

static SYMPTOM_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    sorted_longest_first(vec![
        "neck pain",
        "back pain",
        "neck and back pain",
        "backache",
        "headache",
        "pain",
        "stiffness",
        "discomfort",
        "tenderness",
        "trouble sleeping",
        "dizziness",
        "nausea",
        "fatigue",
        "numbness",
        "swelling",
        "fever",
        "cough",
        "shortness of breath",
    ])
});

static DISEASE_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    sorted_longest_first(vec![
        "whiplash injury",
        "whiplash",
        "concussion",
        "fracture",
        "sprain",
        "migraine",
        "arthritis",
        "hypertension",
        "diabetes",
        "infection",
    ])
});

static TREATMENT_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    sorted_longest_first(vec![
        "physiotherapy sessions",
        "physiotherapy",
        "painkillers",
        "analgesics",
        "ibuprofen",
        "paracetamol",
        "anti-inflammatories",
        "muscle relaxants",
    ])
});

static PROCEDURE_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    sorted_longest_first(vec![
        "physical examination",
        "x-ray",
        "x-rays",
        "ct scan",
        "mri",
        "surgery",
    ])
});

fn sorted_longest_first(mut terms: Vec<&'static str>) -> Vec<&'static str> {
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    terms
}

/// Clinical lexicon matcher emitting SYMPTOM/DISEASE/TREATMENT/PROCEDURE spans.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryNer;

impl Ner for DictionaryNer {
    fn extract(&self, text: &str) -> ModelResult<Vec<Span>> {
        let mut spans = Vec::new();
        find_terms(text, &DISEASE_TERMS, "DISEASE", &mut spans);
        find_terms(text, &PROCEDURE_TERMS, "PROCEDURE", &mut spans);
        find_terms(text, &TREATMENT_TERMS, "TREATMENT", &mut spans);
        find_terms(text, &SYMPTOM_TERMS, "SYMPTOM", &mut spans);
        spans.sort_by_key(|span| span.start);
        Ok(spans)
    }
}

/// Append whole-word matches of `terms`, skipping anything overlapping an earlier span.
fn find_terms(text: &str, terms: &[&str], label: &str, spans: &mut Vec<Span>) {
    // ASCII folding keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    for term in terms {
        let mut start_pos = 0;
        while let Some(pos) = lower[start_pos..].find(term) {
            let start = start_pos + pos;
            let end = start + term.len();
            start_pos = end;
            if !is_word_boundary(&lower, start, end) {
                continue;
            }
            if spans.iter().any(|s| start < s.end && s.start < end) {
                continue;
            }
            spans.push(Span {
                start,
                end,
                label: label.to_string(),
                text: text[start..end].to_string(),
                score: 0.8,
            });
        }
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Load the configured NER backend. Fails when the model artefacts are missing.
pub fn load_model(settings: &Settings) -> ModelResult<Arc<dyn Ner>> {
    #[cfg(feature = "onnx")]
    {
        let dir = settings.join_model("ner");
        let model = super::onnx::TokenClassifier::load(&dir)?;
        info!(path = %dir.display(), "loaded onnx ner model");
        Ok(Arc::new(model) as Arc<dyn Ner>)
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = settings;
        info!("using clinical lexicon ner");
        Ok(Arc::new(DictionaryNer) as Arc<dyn Ner>)
    }
}
