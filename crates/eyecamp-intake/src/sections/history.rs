use eyecamp_core::models::{PatientRecord, SectionId};

use crate::Section;
use crate::rules::FieldRule;

/// Free-text medical and ocular history. Optional.
pub struct History;

impl Section for History {
    fn id(&self) -> SectionId {
        SectionId::History
    }

    fn title(&self) -> &str {
        "History Collection"
    }

    fn rules(&self) -> &[FieldRule] {
        &[]
    }

    fn is_complete(&self, record: &PatientRecord) -> bool {
        !record.history.is_empty()
    }
}
