use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use medscribe::{
    clinical::entities::{
        mentions_recovery, EntityCategory, MedicalEntityExtractor, RECOVERY_PROGNOSIS,
    },
    error::ModelResult,
    nlp::ner::{DictionaryNer, Ner, Span},
};
use proptest::prelude::*;

/// Emits one span per comma-separated `LABEL=text` pair.
struct ScriptedNer;

impl Ner for ScriptedNer {
    fn extract(&self, text: &str) -> ModelResult<Vec<Span>> {
        Ok(text
            .split(',')
            .filter_map(|part| part.trim().split_once('='))
            .map(|(label, value)| Span {
                start: 0,
                end: value.len(),
                label: label.to_string(),
                text: value.to_string(),
                score: 1.0,
            })
            .collect())
    }
}

#[test]
fn labels_map_to_categories() {
    assert_eq!(EntityCategory::from_label("symptom"), Some(EntityCategory::Symptoms));
    assert_eq!(EntityCategory::from_label("DISEASE"), Some(EntityCategory::Diagnosis));
    assert_eq!(EntityCategory::Treatment.to_string(), "Treatment");
    assert_eq!(EntityCategory::from_label("Procedure"), Some(EntityCategory::Treatment));
    assert_eq!(EntityCategory::from_label("TREATMENT"), Some(EntityCategory::Treatment));
    assert_eq!(EntityCategory::from_label("CHEMICAL"), None);
}

#[test]
fn unmapped_labels_are_discarded_and_duplicates_collapse() {
    let extractor = MedicalEntityExtractor::new(Arc::new(ScriptedNer));
    let buckets = extractor
        .extract(&[
            "SYMPTOM=neck pain, CHEMICAL=ethanol",
            "symptom=neck pain, PROCEDURE=x-ray, TREATMENT=painkillers",
        ])
        .unwrap();
    assert_eq!(buckets.list(EntityCategory::Symptoms), vec!["neck pain"]);
    assert_eq!(
        buckets.list(EntityCategory::Treatment),
        vec!["painkillers", "x-ray"]
    );
    assert!(buckets.diagnosis.is_empty());
    assert!(buckets.prognosis.is_empty());
}

#[test]
fn recovery_rule_is_independent_of_the_model() {
    let extractor = MedicalEntityExtractor::new(Arc::new(ScriptedNer));
    let buckets = extractor
        .extract(&["I hope to RECOVER soon", "A full recovery is likely"])
        .unwrap();
    assert_eq!(
        buckets.list(EntityCategory::Prognosis),
        vec![RECOVERY_PROGNOSIS.to_string()]
    );
}

#[test]
fn backache_example_yields_symptom_and_prognosis() {
    let extractor = MedicalEntityExtractor::new(Arc::new(DictionaryNer));
    let buckets = extractor
        .extract(&[
            "How are you?",
            "I have a slight backache but I expect a full recovery.",
        ])
        .unwrap();
    assert!(buckets.symptoms.contains("backache"));
    assert!(buckets.prognosis.contains("Full recovery expected"));
}

#[test]
fn dictionary_prefers_longest_match() {
    let spans = DictionaryNer
        .extract("It was a whiplash injury with neck pain, treated with physiotherapy.")
        .unwrap();
    let texts: Vec<(&str, &str)> = spans
        .iter()
        .map(|s| (s.label.as_str(), s.text.as_str()))
        .collect();
    assert_eq!(
        texts,
        vec![
            ("DISEASE", "whiplash injury"),
            ("SYMPTOM", "neck pain"),
            ("TREATMENT", "physiotherapy"),
        ]
    );
}

#[test]
fn dictionary_respects_word_boundaries() {
    let spans = DictionaryNer.extract("The painting was spainful").unwrap();
    assert!(spans.is_empty());
}

#[test]
fn recovery_cue_detection() {
    assert!(mentions_recovery("Recovering well"));
    assert!(!mentions_recovery("Still sore"));
}

proptest! {
    #[test]
    fn buckets_hold_each_mapped_span_once(
        picks in proptest::collection::vec(0usize..5, 0..30)
    ) {
        const UTTERANCES: [&str; 5] = [
            "My neck pain is back",
            "The neck pain and headache got worse",
            "Physiotherapy helped the stiffness",
            "They said whiplash",
            "I should recover fully",
        ];
        let texts: Vec<&str> = picks.iter().map(|&i| UTTERANCES[i]).collect();
        let extractor = MedicalEntityExtractor::new(Arc::new(DictionaryNer));
        let buckets = extractor.extract(&texts).unwrap();

        let mut expected: BTreeMap<EntityCategory, BTreeSet<String>> = BTreeMap::new();
        let mut raw_spans: BTreeMap<EntityCategory, usize> = BTreeMap::new();
        for text in &texts {
            for span in DictionaryNer.extract(text).unwrap() {
                if let Some(category) = EntityCategory::from_label(&span.label) {
                    *raw_spans.entry(category).or_default() += 1;
                    expected.entry(category).or_default().insert(span.text);
                }
            }
            if mentions_recovery(text) {
                *raw_spans.entry(EntityCategory::Prognosis).or_default() += 1;
                expected
                    .entry(EntityCategory::Prognosis)
                    .or_default()
                    .insert(RECOVERY_PROGNOSIS.to_string());
            }
        }

        for category in EntityCategory::ALL {
            let want = expected.remove(&category).unwrap_or_default();
            prop_assert_eq!(buckets.get(category), &want, "{}", category);
            prop_assert!(buckets.list(category).len() <= raw_spans.get(&category).copied().unwrap_or(0));
        }
    }
}
