use medscribe::clinical::{
    entities::{EntityBuckets, EntityCategory},
    report::{build, UNKNOWN},
};

fn buckets() -> EntityBuckets {
    let mut buckets = EntityBuckets::default();
    buckets.insert(EntityCategory::Symptoms, "neck pain");
    buckets.insert(EntityCategory::Symptoms, "backache");
    buckets.insert(EntityCategory::Diagnosis, "whiplash injury");
    buckets.insert(EntityCategory::Treatment, "physiotherapy");
    buckets
}

#[test]
fn empty_diagnosis_is_unknown() {
    let report = build("Janet Jones", &EntityBuckets::default(), "Stable", "Good");
    assert_eq!(report.diagnosis, UNKNOWN);
    assert!(report.symptoms.is_empty());
    assert!(report.treatment.is_empty());
}

#[test]
fn only_first_diagnosis_is_kept() {
    let mut entities = buckets();
    entities.insert(EntityCategory::Diagnosis, "concussion");
    let report = build("Janet Jones", &entities, "Stable", "Good");
    let first = entities.diagnosis.iter().next().unwrap();
    assert_eq!(&report.diagnosis, first);
    assert_eq!(report.diagnosis, "concussion");
}

#[test]
fn blank_status_and_prognosis_become_unknown() {
    let report = build("Janet Jones", &buckets(), "", "");
    assert_eq!(report.current_status, UNKNOWN);
    assert_eq!(report.prognosis, UNKNOWN);
}

#[test]
fn building_twice_is_value_equal() {
    let entities = buckets();
    let a = build("Janet Jones", &entities, "Occasional backache", "Good");
    let b = build("Janet Jones", &entities, "Occasional backache", "Good");
    assert_eq!(a, b);
}

#[test]
fn report_json_shape() {
    let report = build(
        "Janet Jones",
        &buckets(),
        "Occasional backache",
        "Full recovery expected within six months",
    );
    insta::assert_json_snapshot!(report, @r###"
    {
      "Patient_Name": "Janet Jones",
      "Symptoms": [
        "backache",
        "neck pain"
      ],
      "Diagnosis": "whiplash injury",
      "Treatment": [
        "physiotherapy"
      ],
      "Current_Status": "Occasional backache",
      "Prognosis": "Full recovery expected within six months"
    }
    "###);
}
