use eyecamp_core::models::{Eye, PatientRecord, SectionId};
use eyecamp_core::notation::Acuity;

use crate::Section;
use crate::fields::FieldPath;
use crate::rules::{FieldIssue, FieldRule};

/// Distant (Snellen, `6/9`) and near (`N6/40`) acuity per eye.
pub struct Vision;

impl Section for Vision {
    fn id(&self) -> SectionId {
        SectionId::Vision
    }

    fn title(&self) -> &str {
        "Vision Check"
    }

    fn rules(&self) -> &[FieldRule] {
        &[]
    }

    fn is_complete(&self, record: &PatientRecord) -> bool {
        Eye::BOTH.iter().any(|&eye| {
            !record.distant_vision(eye).is_empty() || !record.near_vision(eye).is_empty()
        })
    }

    fn advisories(&self, record: &PatientRecord) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for eye in Eye::BOTH {
            for (path, text) in [
                (FieldPath::DistantVision(eye), record.distant_vision(eye)),
                (FieldPath::NearVision(eye), record.near_vision(eye)),
            ] {
                if !text.is_empty() && Acuity::parse(text).is_none() {
                    issues.push(FieldIssue::warning(
                        path,
                        format!("'{text}' is not a recognized acuity; use 6/9 or N6/40"),
                    ));
                }
            }
        }
        issues
    }
}
