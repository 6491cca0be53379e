//! Local storage key conventions.
//!
//! Pure string functions. These define where drafts, sync credentials and
//! the delivery queue live in the local key-value store.

/// The single draft slot used when drafts are not keyed per record.
pub const SHARED_DRAFT: &str = "patientFormData";

/// Per-patient draft key. `None` only occurs for drafts written before
/// patients were given an id on creation.
pub fn draft(camp_id: &str, patient_id: Option<uuid::Uuid>) -> String {
    match patient_id {
        Some(id) => format!("drafts/{camp_id}/{id}"),
        None => format!("drafts/{camp_id}/new"),
    }
}

pub const DRIVE_CREDENTIALS: &str = "driveCredentials";

pub const SYNC_QUEUE: &str = "driveSyncQueue";

pub const CAMP_RESOURCES: &str = "campResources";

pub fn camp_patients(camp_id: &str) -> String {
    format!("campPatients/{camp_id}")
}
