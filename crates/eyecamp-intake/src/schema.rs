//! The combined form schema.
//!
//! Each section validates independently; the schema composes them into one
//! aggregate validator whose report keeps errors grouped by section.

use std::collections::BTreeSet;

use eyecamp_core::models::{PatientRecord, SectionId};

use crate::Section;
use crate::rules::{SectionReport, ValidationReport};

pub struct FormSchema {
    sections: Vec<Box<dyn Section>>,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormSchema {
    /// All six sections.
    pub fn standard() -> Self {
        Self::compose(crate::all_sections())
    }

    /// Merge section validators into one schema. Sections are kept in wizard
    /// order; a later section with the same id replaces an earlier one.
    pub fn compose(sections: impl IntoIterator<Item = Box<dyn Section>>) -> Self {
        let mut merged: Vec<Box<dyn Section>> = Vec::new();
        for section in sections {
            merged.retain(|s| s.id() != section.id());
            merged.push(section);
        }
        merged.sort_by_key(|s| s.id());
        Self { sections: merged }
    }

    pub fn sections(&self) -> impl Iterator<Item = &dyn Section> {
        self.sections.iter().map(|s| s.as_ref())
    }

    pub fn section(&self, id: SectionId) -> Option<&dyn Section> {
        self.sections().find(|s| s.id() == id)
    }

    /// A section absent from the schema has nothing to check and is valid.
    pub fn validate_section(&self, id: SectionId, record: &PatientRecord) -> SectionReport {
        match self.section(id) {
            Some(section) => section.validate(record),
            None => SectionReport::new(id, Vec::new(), Vec::new()),
        }
    }

    pub fn validate_all(&self, record: &PatientRecord) -> ValidationReport {
        ValidationReport::new(self.sections().map(|s| s.validate(record)).collect())
    }

    /// Sections whose completion predicate holds for `record`.
    pub fn completion(&self, record: &PatientRecord) -> BTreeSet<SectionId> {
        self.sections()
            .filter(|s| s.is_complete(record))
            .map(|s| s.id())
            .collect()
    }
}
