use serde::{Deserialize, Serialize};

/// A camp whose spreadsheet is behind its local ledger.
///
/// Only the camp is queued, not the records: each delivery rewrites the
/// camp's full row set from the ledger, so replaying an entry is harmless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSync {
    pub camp_id: String,
    pub queued_at: jiff::Timestamp,
    /// Bumped on every touch; a delivery only settles the revision it read.
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl PendingSync {
    pub fn new(camp_id: impl Into<String>) -> Self {
        Self {
            camp_id: camp_id.into(),
            queued_at: jiff::Timestamp::now(),
            revision: 0,
            attempts: 0,
            last_error: None,
        }
    }
}

/// Mark `camp_id` as behind. An existing entry keeps its attempt count but
/// gets a fresh `queued_at` and the next revision. Returns true if a new
/// entry was added.
pub fn touch(queue: &mut Vec<PendingSync>, camp_id: &str) -> bool {
    match queue.iter_mut().find(|p| p.camp_id == camp_id) {
        Some(entry) => {
            entry.queued_at = jiff::Timestamp::now();
            entry.revision = entry.revision.wrapping_add(1);
            false
        }
        None => {
            queue.push(PendingSync::new(camp_id));
            true
        }
    }
}

pub fn record_failure(queue: &mut [PendingSync], camp_id: &str, error: &str) {
    if let Some(entry) = queue.iter_mut().find(|p| p.camp_id == camp_id) {
        entry.attempts += 1;
        entry.last_error = Some(error.to_string());
    }
}

/// The current revision of `camp_id`'s entry, if it is pending.
pub fn revision(queue: &[PendingSync], camp_id: &str) -> Option<u64> {
    queue
        .iter()
        .find(|p| p.camp_id == camp_id)
        .map(|p| p.revision)
}

/// Drop the entry for `camp_id` if it is still at `delivered`, the revision
/// seen before the ledger was read. An entry touched or created while the
/// delivery was in flight stays queued.
pub fn settle(queue: &mut Vec<PendingSync>, camp_id: &str, delivered: Option<u64>) {
    queue.retain(|p| p.camp_id != camp_id || Some(p.revision) != delivered);
}
