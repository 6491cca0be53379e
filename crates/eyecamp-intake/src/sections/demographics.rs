use eyecamp_core::models::{PatientRecord, SectionId};

use crate::Section;
use crate::fields::FieldPath;
use crate::rules::{Check, FieldIssue, FieldRule};

pub const MIN_NAME_LEN: usize = 2;

/// Patient name, age and sex. The only section besides the outcome with
/// required fields.
pub struct Demographics;

impl Section for Demographics {
    fn id(&self) -> SectionId {
        SectionId::Demographics
    }

    fn title(&self) -> &str {
        "Patient Demographics"
    }

    fn rules(&self) -> &[FieldRule] {
        static RULES: std::sync::LazyLock<Vec<FieldRule>> = std::sync::LazyLock::new(|| {
            vec![
                FieldRule::new(
                    FieldPath::Name,
                    Check::MinLength(MIN_NAME_LEN),
                    "Name must be at least 2 characters",
                ),
                FieldRule::new(FieldPath::Age, Check::Required, "Age is required"),
                FieldRule::new(FieldPath::Sex, Check::Required, "Sex selection is required"),
            ]
        });
        &RULES
    }

    fn is_complete(&self, record: &PatientRecord) -> bool {
        !record.name.is_empty() && !record.age.is_empty() && record.sex.is_some()
    }

    fn advisories(&self, record: &PatientRecord) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if !record.age.is_empty() && record.age.trim().parse::<u16>().is_err() {
            issues.push(FieldIssue::warning(
                FieldPath::Age,
                "Age should be a whole number of years",
            ));
        }
        issues
    }
}
