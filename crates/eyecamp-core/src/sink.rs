use crate::error::HandoffError;
use crate::models::PatientRecord;

/// Downstream collaborator that takes ownership of finalized records.
///
/// `accept` must return once the record is safe locally; delivery to any
/// remote system happens later and is the sink's responsibility.
pub trait RecordSink: Send + Sync {
    fn accept(&self, record: &PatientRecord) -> Result<(), HandoffError>;
}
