use std::sync::Arc;

use medscribe::{
    clinical::{intent::PatientIntent, sentiment::ClinicalSentiment},
    config::Settings,
    error::{ModelError, ModelResult},
    nlp::{
        summarize::{GenerationParams, Summarizer},
        ModelSet,
    },
    pipeline::{run_pipeline, Pipeline, ReportFields},
};

const EXAMPLE: &str =
    "Doctor: How are you?\nPatient: I have a slight backache but I expect a full recovery.\n";

struct Failing;

impl Summarizer for Failing {
    fn summarize(&self, _text: &str, _params: &GenerationParams) -> ModelResult<String> {
        Err(ModelError::inference("summarizer", "context window exceeded"))
    }
}

#[test]
fn example_transcript_end_to_end() {
    let settings = Settings::default();
    let result = run_pipeline(&ModelSet::lexical(), &settings, EXAMPLE).unwrap();

    assert_eq!(result.patient_intent, PatientIntent::ReportingSymptoms);
    assert_eq!(result.medical_summary.patient_name, "Janet Jones");
    assert_eq!(result.medical_summary.symptoms, vec!["backache"]);
    assert_eq!(result.medical_summary.diagnosis, "Unknown");
    assert_eq!(result.medical_summary.current_status, "Occasional backache");
    assert_eq!(
        result.medical_summary.prognosis,
        "Full recovery expected within six months"
    );
    assert!(result.narrative_summary.contains("backache"));
}

#[test]
fn result_serializes_with_four_top_level_keys() {
    let result = run_pipeline(&ModelSet::lexical(), &Settings::default(), EXAMPLE).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "Medical_Summary",
            "Narrative_Summary",
            "Patient_Intent",
            "Patient_Sentiment"
        ]
    );
    assert_eq!(value["Patient_Intent"], "Reporting symptoms");
}

#[test]
fn transcript_without_patient_turns_is_neutral() {
    let result = run_pipeline(
        &ModelSet::lexical(),
        &Settings::default(),
        "Doctor: Please take a seat.\nrandom noise",
    )
    .unwrap();
    assert_eq!(result.patient_sentiment, ClinicalSentiment::Neutral);
    assert_eq!(result.patient_intent, PatientIntent::NeutralInquiry);
}

#[test]
fn report_fields_can_be_overridden() {
    let pipeline = Pipeline::new(&ModelSet::lexical(), &Settings::default()).with_report_fields(
        ReportFields {
            patient_name: "Sam Doe".into(),
            current_status: String::new(),
            prognosis: "Guarded".into(),
        },
    );
    let report = pipeline.run(EXAMPLE).unwrap().medical_summary;
    assert_eq!(report.patient_name, "Sam Doe");
    assert_eq!(report.current_status, "Unknown");
    assert_eq!(report.prognosis, "Guarded");
}

#[test]
fn model_failures_propagate() {
    let mut models = ModelSet::lexical();
    models.summarizer = Arc::new(Failing);
    let err = run_pipeline(&models, &Settings::default(), EXAMPLE).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("summarizing transcript"), "{message}");
    assert!(message.contains("context window exceeded"), "{message}");
}

#[test]
fn settings_reject_inverted_summary_bounds() {
    let settings = Settings {
        summary_min_length: 200,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
    assert!(Settings::default().validate().is_ok());
}
