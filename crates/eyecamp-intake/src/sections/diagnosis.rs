use eyecamp_core::models::{PatientRecord, SectionId};

use crate::Section;
use crate::rules::FieldRule;

pub struct Diagnosis;

impl Section for Diagnosis {
    fn id(&self) -> SectionId {
        SectionId::Diagnosis
    }

    fn title(&self) -> &str {
        "Ocular Diagnosis"
    }

    fn rules(&self) -> &[FieldRule] {
        &[]
    }

    fn is_complete(&self, record: &PatientRecord) -> bool {
        !record.ocular_diagnosis.is_empty()
    }
}
