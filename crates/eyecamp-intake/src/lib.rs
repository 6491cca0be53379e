//! eyecamp-intake
//!
//! The clinical intake form. Defines the six form sections, their required
//! fields and completion rules, the combined validation schema, and the
//! engine that owns a patient draft from first keystroke to submission.

pub mod draft;
pub mod engine;
pub mod error;
pub mod fields;
pub mod rules;
pub mod schema;
pub mod sections;

use eyecamp_core::models::{PatientRecord, SectionId};
use rules::{FieldIssue, FieldRule, SectionReport};

/// Trait implemented by each section of the intake form.
pub trait Section: Send + Sync {
    fn id(&self) -> SectionId;

    /// Heading shown to the examiner (e.g., "Vision Check").
    fn title(&self) -> &str;

    /// Constraints that must hold before the section can be left in wizard
    /// mode and before the record can be submitted.
    fn rules(&self) -> &[FieldRule];

    /// Whether the section counts as filled in for the progress indicator.
    fn is_complete(&self, record: &PatientRecord) -> bool;

    /// Non-blocking observations about entered values.
    fn advisories(&self, _record: &PatientRecord) -> Vec<FieldIssue> {
        Vec::new()
    }

    /// Sections without rules never block navigation or submission.
    fn is_required(&self) -> bool {
        !self.rules().is_empty()
    }

    fn validate(&self, record: &PatientRecord) -> SectionReport {
        let errors: Vec<_> = self
            .rules()
            .iter()
            .filter_map(|rule| rule.evaluate(record))
            .collect();
        SectionReport::new(self.id(), errors, self.advisories(record))
    }
}

/// Return all sections in wizard order.
pub fn all_sections() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(sections::demographics::Demographics),
        Box::new(sections::history::History),
        Box::new(sections::vision::Vision),
        Box::new(sections::refraction::Refraction),
        Box::new(sections::diagnosis::Diagnosis),
        Box::new(sections::outcome::OutcomeSection),
    ]
}

/// Look up a section by ID.
pub fn get_section(id: SectionId) -> Option<Box<dyn Section>> {
    all_sections().into_iter().find(|s| s.id() == id)
}
