use thiserror::Error;

use eyecamp_core::error::{CoreError, HandoffError, StoreError};
use eyecamp_core::models::SectionId;

use crate::rules::{FieldIssue, ValidationReport};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{field}' expects {expected}")]
    FieldKind {
        field: String,
        expected: &'static str,
    },

    #[error("'{value}' is not a valid choice for {field}")]
    InvalidChoice { field: String, value: String },

    #[error("{section} section has {} unresolved error(s)", .errors.len())]
    SectionIncomplete {
        section: SectionId,
        errors: Vec<FieldIssue>,
    },

    #[error("already at the last section")]
    AtLastSection,

    #[error("record failed validation with {} error(s)", .0.error_count())]
    Validation(ValidationReport),

    #[error("draft storage error: {0}")]
    Store(#[from] StoreError),

    #[error("draft encoding error: {0}")]
    Encoding(#[from] CoreError),

    #[error(transparent)]
    Handoff(#[from] HandoffError),
}
