use eyecamp_core::models::{PatientRecord, SectionId};

use crate::Section;
use crate::fields::FieldPath;
use crate::rules::{Check, FieldRule};

/// Disposition of the visit. Submission is gated on this section.
pub struct OutcomeSection;

impl Section for OutcomeSection {
    fn id(&self) -> SectionId {
        SectionId::Outcome
    }

    fn title(&self) -> &str {
        "Outcome Selection"
    }

    fn rules(&self) -> &[FieldRule] {
        static RULES: std::sync::LazyLock<Vec<FieldRule>> = std::sync::LazyLock::new(|| {
            vec![FieldRule::new(
                FieldPath::Outcome,
                Check::Required,
                "Outcome selection is required",
            )]
        });
        &RULES
    }

    fn is_complete(&self, record: &PatientRecord) -> bool {
        record.outcome.is_some()
    }
}
