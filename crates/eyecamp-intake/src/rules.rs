use serde::{Deserialize, Serialize};
use ts_rs::TS;

use eyecamp_core::models::{PatientRecord, SectionId};

use crate::fields::FieldPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    /// Blocks wizard advancement and submission.
    Error,
    /// Shown inline; never blocks.
    Warning,
}

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldIssue {
    pub field: String,
    pub severity: Severity,
    pub message: String,
}

impl FieldIssue {
    pub fn error(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field: field.name(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field: field.name(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// The constraint a rule applies to its field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Non-empty.
    Required,
    /// At least this many characters.
    MinLength(usize),
}

impl Check {
    pub fn passes(self, text: &str) -> bool {
        match self {
            Check::Required => !text.is_empty(),
            Check::MinLength(min) => text.chars().count() >= min,
        }
    }
}

/// A declarative constraint on one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FieldPath,
    pub check: Check,
    pub message: String,
}

impl FieldRule {
    pub fn new(field: FieldPath, check: Check, message: &str) -> Self {
        Self {
            field,
            check,
            message: message.to_string(),
        }
    }

    pub fn evaluate(&self, record: &PatientRecord) -> Option<FieldIssue> {
        let text = self.field.text(record).unwrap_or_default();
        if self.check.passes(text) {
            None
        } else {
            Some(FieldIssue::error(self.field, self.message.clone()))
        }
    }
}

/// Result of validating one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionReport {
    pub section: SectionId,
    pub valid: bool,
    pub errors: Vec<FieldIssue>,
    pub warnings: Vec<FieldIssue>,
}

impl SectionReport {
    pub fn new(section: SectionId, errors: Vec<FieldIssue>, warnings: Vec<FieldIssue>) -> Self {
        Self {
            section,
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldIssue> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// Result of validating the whole record, one report per section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationReport {
    pub valid: bool,
    pub sections: Vec<SectionReport>,
}

impl ValidationReport {
    pub fn new(sections: Vec<SectionReport>) -> Self {
        Self {
            valid: sections.iter().all(|s| s.valid),
            sections,
        }
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.section == id)
    }

    /// All blocking errors, in section order.
    pub fn errors(&self) -> impl Iterator<Item = &FieldIssue> {
        self.sections.iter().flat_map(|s| &s.errors)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Where the examiner is sent back to after a failed submission.
    pub fn first_failing_section(&self) -> Option<SectionId> {
        self.sections.iter().find(|s| !s.valid).map(|s| s.section)
    }
}
