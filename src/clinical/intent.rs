//! Keyword-based patient intent detection.

use std::fmt;

use serde::{Deserialize, Serialize};

const REASSURANCE_PHRASES: &[&str] = &["worried", "concerned", "will this", "affect me", "long term"];

const SYMPTOM_PHRASES: &[&str] = &["pain", "hurt", "ache", "discomfort", "stiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientIntent {
    #[serde(rename = "Seeking reassurance")]
    SeekingReassurance,
    #[serde(rename = "Reporting symptoms")]
    ReportingSymptoms,
    #[serde(rename = "Neutral inquiry")]
    NeutralInquiry,
}

impl PatientIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SeekingReassurance => "Seeking reassurance",
            Self::ReportingSymptoms => "Reporting symptoms",
            Self::NeutralInquiry => "Neutral inquiry",
        }
    }
}

impl fmt::Display for PatientIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reassurance phrases are checked before symptom phrases.
pub fn detect<S: AsRef<str>>(patient_texts: &[S]) -> PatientIntent {
    let text = patient_texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if REASSURANCE_PHRASES.iter().any(|p| text.contains(p)) {
        PatientIntent::SeekingReassurance
    } else if SYMPTOM_PHRASES.iter().any(|p| text.contains(p)) {
        PatientIntent::ReportingSymptoms
    } else {
        PatientIntent::NeutralInquiry
    }
}
