use std::sync::{Arc, Mutex};

use medscribe::{
    clinical::sentiment::{ClinicalSentiment, PatientSentimentAnalyzer},
    error::ModelResult,
    nlp::sentiment::{LexiconSentiment, Polarity, SentimentModel, SentimentPrediction},
};

struct MustNotRun;

impl SentimentModel for MustNotRun {
    fn classify(&self, _text: &str) -> ModelResult<SentimentPrediction> {
        panic!("sentiment model invoked for an empty utterance list");
    }
}

struct Fixed {
    prediction: SentimentPrediction,
    seen: Mutex<Vec<String>>,
}

impl Fixed {
    fn new(label: Polarity, score: f32) -> Arc<Self> {
        Arc::new(Self {
            prediction: SentimentPrediction { label, score },
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl SentimentModel for Fixed {
    fn classify(&self, text: &str) -> ModelResult<SentimentPrediction> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.prediction)
    }
}

#[test]
fn empty_input_is_neutral_without_model_call() {
    let analyzer = PatientSentimentAnalyzer::new(Arc::new(MustNotRun));
    let empty: [&str; 0] = [];
    assert_eq!(analyzer.analyze(&empty).unwrap(), ClinicalSentiment::Neutral);
}

#[test]
fn utterances_are_joined_into_one_call() {
    let model = Fixed::new(Polarity::Negative, 0.9);
    let analyzer = PatientSentimentAnalyzer::new(model.clone());
    let label = analyzer.analyze(&["I'm worried", "about my back"]).unwrap();
    assert_eq!(label, ClinicalSentiment::Anxious);
    assert_eq!(*model.seen.lock().unwrap(), vec!["I'm worried about my back"]);
}

#[test]
fn threshold_is_strict() {
    let cases = [
        (Polarity::Negative, 0.61, ClinicalSentiment::Anxious),
        (Polarity::Negative, 0.6, ClinicalSentiment::Neutral),
        (Polarity::Positive, 0.95, ClinicalSentiment::Reassured),
        (Polarity::Positive, 0.55, ClinicalSentiment::Neutral),
    ];
    for (label, score, expected) in cases {
        let analyzer = PatientSentimentAnalyzer::new(Fixed::new(label, score));
        assert_eq!(analyzer.analyze(&["text"]).unwrap(), expected, "{label} {score}");
    }
}

#[test]
fn label_parsing_rejects_unknown_values() {
    assert_eq!(Polarity::from_label("positive").unwrap(), Polarity::Positive);
    assert_eq!(Polarity::from_label("LABEL_0").unwrap(), Polarity::Negative);
    assert!(Polarity::from_label("MIXED").is_err());
}

#[test]
fn lexicon_model_leans_with_cue_words() {
    let model = LexiconSentiment;
    let worried = model.classify("I'm worried the pain will get worse").unwrap();
    assert_eq!(worried.label, Polarity::Negative);
    assert!(worried.score > 0.6);

    let relieved = model.classify("That's a relief, thank you, I feel better").unwrap();
    assert_eq!(relieved.label, Polarity::Positive);
    assert!(relieved.score > 0.6);

    let flat = model.classify("I went to the shop").unwrap();
    assert!((flat.score - 0.5).abs() < f32::EPSILON);
}

#[test]
fn clinical_labels_serialize_as_display_text() {
    let json = serde_json::to_string(&ClinicalSentiment::Reassured).unwrap();
    assert_eq!(json, "\"Reassured\"");
}
