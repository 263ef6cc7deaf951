//! Flat medical report assembled from entity buckets.

use serde::{Deserialize, Serialize};

use super::entities::EntityBuckets;

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalReport {
    #[serde(rename = "Patient_Name")]
    pub patient_name: String,
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Current_Status")]
    pub current_status: String,
    #[serde(rename = "Prognosis")]
    pub prognosis: String,
}

/// Pure assembly: only the first diagnosis is kept; blank status/prognosis become "Unknown".
pub fn build(
    patient_name: &str,
    entities: &EntityBuckets,
    current_status: &str,
    prognosis: &str,
) -> MedicalReport {
    MedicalReport {
        patient_name: patient_name.to_string(),
        symptoms: entities.symptoms.iter().cloned().collect(),
        diagnosis: entities
            .diagnosis
            .iter()
            .next()
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        treatment: entities.treatment.iter().cloned().collect(),
        current_status: or_unknown(current_status),
        prognosis: or_unknown(prognosis),
    }
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
