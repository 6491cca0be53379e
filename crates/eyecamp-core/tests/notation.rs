use eyecamp_core::models::{RefractionMeasurement, RefractionStage};
use eyecamp_core::notation::{
    self, Acuity, ValueIssue, check_axis, check_magnitude, distance_acuity, encode, near_acuity,
};

#[test]
fn all_empty_encodes_to_empty_string() {
    assert_eq!(encode(true, "", false, "", ""), "");
    assert_eq!(encode(false, "", true, "", ""), "");
}

#[test]
fn sphere_only() {
    assert_eq!(encode(true, "1.00", false, "", ""), "+1.00DS");
    assert_eq!(encode(false, "2.25", false, "", ""), "-2.25DS");
}

#[test]
fn full_prescription() {
    assert_eq!(
        encode(true, "1.00", false, "0.50", "180"),
        "+1.00DS/-0.50DCx180"
    );
}

#[test]
fn cylinder_without_axis_has_no_axis_suffix() {
    assert_eq!(encode(true, "1.00", false, "0.50", ""), "+1.00DS/-0.50DC");
}

#[test]
fn cylinder_without_sphere_starts_with_slash() {
    assert_eq!(encode(true, "", false, "0.50", "180"), "/-0.50DCx180");
    assert_eq!(encode(true, "", true, "0.75", ""), "/+0.75DC");
}

#[test]
fn orphan_axis_is_dropped() {
    assert_eq!(encode(true, "1.00", false, "", "90"), "+1.00DS");
    assert_eq!(encode(true, "", false, "", "90"), "");
}

#[test]
fn malformed_magnitudes_pass_through() {
    assert_eq!(encode(true, "abc", false, "0,5", "x"), "+abcDS/-0,5DCxx");
    assert_eq!(encode(true, "007", false, "", ""), "+007DS");
}

#[test]
fn measurement_notation_uses_its_signs() {
    let m = RefractionMeasurement {
        sphere: "1.50".to_string(),
        cylinder: "0.50".to_string(),
        axis: "90".to_string(),
        ..RefractionMeasurement::default()
    };
    assert_eq!(m.notation(), "+1.50DS/-0.50DCx90");
}

#[test]
fn preview_falls_back_to_placeholder() {
    let blank = RefractionMeasurement::default();
    assert_eq!(
        notation::preview(&blank, RefractionStage::Dry),
        notation::PLACEHOLDER
    );
    assert_eq!(
        notation::preview(&blank, RefractionStage::AddGiven),
        notation::ADD_PLACEHOLDER
    );

    let add = RefractionMeasurement {
        sphere: "2.00".to_string(),
        ..RefractionMeasurement::default()
    };
    assert_eq!(notation::preview(&add, RefractionStage::AddGiven), "+2.00DS");
}

#[test]
fn parse_reads_back_encoded_forms() {
    for text in [
        "",
        "+1.00DS",
        "-2.25DS",
        "+1.00DS/-0.50DCx180",
        "+1.00DS/-0.50DC",
        "/-0.50DCx180",
        "/+0.75DC",
    ] {
        let parsed = notation::parse(text).unwrap();
        assert_eq!(parsed.notation(), text, "round trip of {text:?}");
    }
}

#[test]
fn parse_extracts_fields() {
    let m = notation::parse("-3.75DS/+1.25DCx45").unwrap();
    assert_eq!(m.sphere, "3.75");
    assert!(!m.sphere_positive);
    assert_eq!(m.cylinder, "1.25");
    assert!(m.cylinder_positive);
    assert_eq!(m.axis, "45");
    assert!(m.note.is_empty());
}

#[test]
fn parse_rejects_malformed_text() {
    use eyecamp_core::error::NotationError;

    assert_eq!(notation::parse("1.00DS"), Err(NotationError::MissingSign(0)));
    assert_eq!(notation::parse("+DS"), Err(NotationError::MissingMagnitude(1)));
    assert_eq!(
        notation::parse("+1.00"),
        Err(NotationError::MissingUnit {
            expected: "DS",
            position: 5
        })
    );
    assert_eq!(notation::parse("/-0.50DCx"), Err(NotationError::MissingAxis(9)));
    assert_eq!(notation::parse("+1.00DS extra"), Err(NotationError::Trailing(7)));
}

#[test]
fn magnitude_checks() {
    assert_eq!(check_magnitude(""), Ok(()));
    assert_eq!(check_magnitude("0"), Ok(()));
    assert_eq!(check_magnitude("1.25"), Ok(()));
    assert_eq!(check_magnitude("01.50"), Ok(()));
    assert_eq!(check_magnitude("1.30"), Err(ValueIssue::OffStep));
    assert_eq!(check_magnitude("-0.25"), Err(ValueIssue::Negative));
    assert_eq!(check_magnitude("one"), Err(ValueIssue::NotANumber));
}

#[test]
fn axis_checks() {
    assert_eq!(check_axis(""), Ok(()));
    assert_eq!(check_axis("0"), Ok(()));
    assert_eq!(check_axis("180"), Ok(()));
    assert_eq!(check_axis("181"), Err(ValueIssue::AxisOutOfRange));
    assert_eq!(check_axis("90.5"), Err(ValueIssue::AxisOutOfRange));
}

#[test]
fn acuity_formatting_and_recognition() {
    assert_eq!(distance_acuity("6", "9"), "6/9");
    assert_eq!(distance_acuity("", ""), "");
    assert_eq!(near_acuity("6", "40"), "N6/40");
    assert_eq!(near_acuity("8", ""), "N8");
    assert_eq!(near_acuity("", ""), "");

    assert_eq!(
        Acuity::parse("6/12"),
        Some(Acuity::Distance {
            numerator: "6".to_string(),
            denominator: "12".to_string()
        })
    );
    assert_eq!(
        Acuity::parse("N6/40cm"),
        Some(Acuity::Near {
            n_value: "6".to_string(),
            distance_cm: Some("40".to_string())
        })
    );
    assert!(Acuity::parse("blurry").is_none());
    assert!(Acuity::parse("6/").is_none());
}
