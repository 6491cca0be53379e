//! The intake form engine.
//!
//! Owns one patient draft at a time. Field edits go through the registry in
//! [`crate::fields`], completion is recomputed after every edit, and the
//! record leaves the engine only through [`IntakeForm::submit`].

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eyecamp_core::models::{Draft, Eye, PatientRecord, RefractionStage, SectionId};
use eyecamp_core::notation;
use eyecamp_core::sink::RecordSink;

use crate::draft::DraftStore;
use crate::error::IntakeError;
use crate::fields::{self, FieldValue};
use crate::rules::{SectionReport, ValidationReport};
use crate::schema::FormSchema;

/// How the examiner moves between sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeMode {
    /// One section at a time; leaving a section requires it to validate.
    #[default]
    Wizard,
    /// Any section at any time; completion is advisory.
    Tabbed,
}

pub struct IntakeForm {
    schema: Arc<FormSchema>,
    mode: IntakeMode,
    record: PatientRecord,
    active: SectionId,
    completed: BTreeSet<SectionId>,
    drafts: DraftStore,
    sink: Arc<dyn RecordSink>,
}

impl IntakeForm {
    /// Start a blank record for `camp_id` under a fresh patient id.
    pub fn new(
        camp_id: impl Into<String>,
        mode: IntakeMode,
        drafts: DraftStore,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        Self::edit(PatientRecord::new(camp_id), mode, drafts, sink)
    }

    /// Open an existing record for editing. A record without an id gets one
    /// here so its draft has a slot of its own.
    pub fn edit(
        mut record: PatientRecord,
        mode: IntakeMode,
        drafts: DraftStore,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        if record.id.is_none() {
            record.id = Some(Uuid::new_v4());
        }
        let schema = Arc::new(FormSchema::standard());
        let completed = schema.completion(&record);
        Self {
            schema,
            mode,
            record,
            active: SectionId::Demographics,
            completed,
            drafts,
            sink,
        }
    }

    /// Pick up a saved draft where the examiner left it.
    pub fn resume(
        draft: Draft,
        mode: IntakeMode,
        drafts: DraftStore,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        let mut record = draft.data;
        if record.camp_id.is_empty() {
            record.camp_id = draft.camp_id;
        }
        let mut form = Self::edit(record, mode, drafts, sink);
        form.active = draft.active_section;
        tracing::debug!(section = %form.active, "resumed draft");
        form
    }

    /// Replace the section validators, e.g. with a reduced schema.
    pub fn with_schema(mut self, schema: Arc<FormSchema>) -> Self {
        self.completed = schema.completion(&self.record);
        self.schema = schema;
        self
    }

    pub fn mode(&self) -> IntakeMode {
        self.mode
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    pub fn camp_id(&self) -> &str {
        &self.record.camp_id
    }

    pub fn active_section(&self) -> SectionId {
        self.active
    }

    /// Write one field and refresh its section's completion.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), IntakeError> {
        let path =
            fields::lookup(name).ok_or_else(|| IntakeError::UnknownField(name.to_string()))?;
        path.write(&mut self.record, value.into())?;

        let section = path.section();
        let complete = self
            .schema
            .section(section)
            .is_some_and(|s| s.is_complete(&self.record));
        if complete {
            self.completed.insert(section);
        } else {
            self.completed.remove(&section);
        }
        tracing::trace!(field = name, %section, complete, "field updated");
        Ok(())
    }

    /// Current value of a field; `None` for names outside the registry.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        fields::lookup(name).map(|path| path.read(&self.record))
    }

    /// Live notation preview for one refraction entry.
    pub fn refraction_preview(&self, stage: RefractionStage, eye: Eye) -> String {
        notation::preview(self.record.refraction(stage).get(eye), stage)
    }

    pub fn validate_section(&self, section: SectionId) -> SectionReport {
        self.schema.validate_section(section, &self.record)
    }

    pub fn validate_all(&self) -> ValidationReport {
        self.schema.validate_all(&self.record)
    }

    pub fn completion(&self) -> BTreeSet<SectionId> {
        self.completed.clone()
    }

    pub fn is_complete(&self, section: SectionId) -> bool {
        self.completed.contains(&section)
    }

    /// Move to the next section. In wizard mode the current section must
    /// validate first.
    pub fn advance(&mut self) -> Result<SectionId, IntakeError> {
        let next = self.active.next().ok_or(IntakeError::AtLastSection)?;
        if self.mode == IntakeMode::Wizard {
            self.ensure_valid(self.active)?;
        }
        self.active = next;
        tracing::debug!(section = %next, "advanced");
        Ok(next)
    }

    /// Move to the previous section. Never gated.
    pub fn back(&mut self) -> Option<SectionId> {
        let previous = self.active.previous()?;
        self.active = previous;
        Some(previous)
    }

    /// Jump to `target`. In wizard mode a forward jump requires every section
    /// in between to validate; the active section is unchanged on failure.
    pub fn go_to(&mut self, target: SectionId) -> Result<(), IntakeError> {
        if self.mode == IntakeMode::Wizard && target > self.active {
            for section in SectionId::ALL[self.active.index()..target.index()].iter() {
                self.ensure_valid(*section)?;
            }
        }
        self.active = target;
        Ok(())
    }

    fn ensure_valid(&self, section: SectionId) -> Result<(), IntakeError> {
        let report = self.validate_section(section);
        if report.valid {
            Ok(())
        } else {
            Err(IntakeError::SectionIncomplete {
                section,
                errors: report.errors,
            })
        }
    }

    /// The key this form's draft is saved under.
    pub fn draft_key(&self) -> String {
        self.drafts.slot().key(&self.record.camp_id, self.record.id)
    }

    /// Checkpoint the current record locally. A failure is returned to the
    /// caller; the in-memory form is unaffected and editing can continue.
    pub fn save_draft(&self) -> Result<String, IntakeError> {
        let draft = Draft {
            data: self.record.clone(),
            camp_id: self.record.camp_id.clone(),
            patient_id: self.record.id,
            active_section: self.active,
            timestamp: jiff::Timestamp::now(),
        };
        self.drafts.save(&draft).inspect_err(|e| {
            tracing::warn!(error = %e, camp_id = %draft.camp_id, "failed to save draft");
        })
    }

    pub fn load_draft(&self, key: &str) -> Result<Option<Draft>, IntakeError> {
        self.drafts.load(key)
    }

    /// Validate the whole record and hand it to the sink.
    ///
    /// On failure the active section moves to the first failing section and
    /// nothing is persisted. On success the record gets its timestamps, its
    /// own draft is discarded and the form resets for the next patient.
    pub fn submit(&mut self) -> Result<PatientRecord, IntakeError> {
        let report = self.validate_all();
        if !report.valid {
            if let Some(section) = report.first_failing_section() {
                self.active = section;
            }
            tracing::debug!(errors = report.error_count(), "submission rejected");
            return Err(IntakeError::Validation(report));
        }

        let draft_key = self.draft_key();
        let now = jiff::Timestamp::now();

        let mut record = self.record.clone();
        let id = *record.id.get_or_insert_with(Uuid::new_v4);
        if record.created_at.is_none() {
            record.created_at = Some(now);
        }
        record.updated_at = Some(now);

        self.sink.accept(&record)?;

        if let Err(e) = self.drafts.clear(&draft_key) {
            tracing::warn!(error = %e, key = %draft_key, "failed to clear submitted draft");
        }

        tracing::info!(patient_id = %id, camp_id = %record.camp_id, "patient record submitted");
        self.reset();
        Ok(record)
    }

    /// Discard the current record and start a blank one, with a new id, for
    /// the same camp.
    pub fn reset(&mut self) {
        self.record = PatientRecord::new(self.record.camp_id.clone());
        self.record.id = Some(Uuid::new_v4());
        self.active = SectionId::Demographics;
        self.completed = self.schema.completion(&self.record);
    }
}
