use eyecamp_core::models::{
    Draft, Eye, Outcome, PatientRecord, RefractionStage, SectionId, Sex,
};

#[test]
fn unset_choices_serialize_as_empty_strings() {
    let record = PatientRecord::new("camp-7");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["campId"], "camp-7");
    assert_eq!(json["sex"], "");
    assert_eq!(json["outcome"], "");
    assert_eq!(json["name"], "");
    assert!(json.get("id").is_none());
    assert_eq!(json["dryRefraction"]["right"]["spherePositive"], true);
    assert_eq!(json["dryRefraction"]["right"]["cylinderPositive"], false);
}

#[test]
fn choices_read_back() {
    let mut record = PatientRecord::new("camp-7");
    record.sex = Some(Sex::Female);
    record.outcome = Some(Outcome::Followup);

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains(r#""sex":"female""#));
    assert!(json.contains(r#""outcome":"followup""#));

    let back: PatientRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn unknown_choice_is_a_deserialization_error() {
    let err = serde_json::from_str::<PatientRecord>(r#"{"campId":"c","sex":"unknown"}"#);
    assert!(err.is_err());
}

#[test]
fn missing_fields_take_defaults() {
    let record: PatientRecord = serde_json::from_str(r#"{"campId":"c","name":"Asha"}"#).unwrap();
    assert_eq!(record.name, "Asha");
    assert_eq!(record.sex, None);
    assert!(record.acceptance.left.sphere_positive);
}

#[test]
fn draft_wire_shape() {
    let mut data = PatientRecord::new("camp-1");
    data.name = "Rajesh Kumar".to_string();
    data.refraction_mut(RefractionStage::Dry).get_mut(Eye::Right).sphere = "1.50".to_string();

    let draft = Draft {
        data,
        camp_id: "camp-1".to_string(),
        patient_id: None,
        active_section: SectionId::Refraction,
        timestamp: "2026-03-01T09:30:00Z".parse().unwrap(),
    };

    let json: serde_json::Value = serde_json::from_str(&draft.to_json().unwrap()).unwrap();
    assert_eq!(json["campId"], "camp-1");
    assert_eq!(json["activeSection"], "refraction");
    assert_eq!(json["timestamp"], "2026-03-01T09:30:00Z");
    assert!(json.get("patientId").is_none());
    assert_eq!(json["data"]["dryRefraction"]["right"]["sphere"], "1.50");

    let back = Draft::from_json(&draft.to_json().unwrap()).unwrap();
    assert_eq!(back, draft);
}

#[test]
fn section_order() {
    assert_eq!(SectionId::Demographics.next(), Some(SectionId::History));
    assert_eq!(SectionId::Outcome.next(), None);
    assert_eq!(SectionId::Demographics.previous(), None);
    assert_eq!(SectionId::Outcome.previous(), Some(SectionId::Diagnosis));
    assert_eq!("vision".parse::<SectionId>().unwrap(), SectionId::Vision);
    assert!("summary".parse::<SectionId>().is_err());
}
