use eyecamp_core::models::{Eye, PatientRecord, RefractionStage, SectionId};
use eyecamp_core::notation::{check_axis, check_magnitude};

use crate::Section;
use crate::fields::{FieldPath, MeasurementPart};
use crate::rules::{FieldIssue, FieldRule};

/// Stages whose entries count toward completion. The near addition alone
/// does not mark the section as filled in.
const COMPLETION_STAGES: [RefractionStage; 2] =
    [RefractionStage::Dry, RefractionStage::Acceptance];

/// Dry refraction, acceptance and add given, each per eye. Optional; entered
/// values are checked for range and step but never block.
pub struct Refraction;

impl Section for Refraction {
    fn id(&self) -> SectionId {
        SectionId::Refraction
    }

    fn title(&self) -> &str {
        "Refraction Values"
    }

    fn rules(&self) -> &[FieldRule] {
        &[]
    }

    fn is_complete(&self, record: &PatientRecord) -> bool {
        COMPLETION_STAGES.iter().any(|&stage| {
            let pair = record.refraction(stage);
            Eye::BOTH.iter().any(|&eye| pair.get(eye).has_values())
        })
    }

    fn advisories(&self, record: &PatientRecord) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for stage in RefractionStage::ALL {
            for eye in Eye::BOTH {
                let m = record.refraction(stage).get(eye);
                let path = |part| FieldPath::Refraction { stage, eye, part };

                if let Err(issue) = check_magnitude(&m.sphere) {
                    issues.push(FieldIssue::warning(
                        path(MeasurementPart::Sphere),
                        format!("Sphere {issue}"),
                    ));
                }
                if let Err(issue) = check_magnitude(&m.cylinder) {
                    issues.push(FieldIssue::warning(
                        path(MeasurementPart::Cylinder),
                        format!("Cylinder {issue}"),
                    ));
                }
                if let Err(issue) = check_axis(&m.axis) {
                    issues.push(FieldIssue::warning(
                        path(MeasurementPart::Axis),
                        format!("Axis {issue}"),
                    ));
                }
                if m.has_orphan_axis() {
                    issues.push(FieldIssue::warning(
                        path(MeasurementPart::Axis),
                        "Axis has no cylinder and will be left out of the prescription",
                    ));
                }
            }
        }
        issues
    }
}
