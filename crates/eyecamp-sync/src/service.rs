//! The sync collaborator.
//!
//! Owns the spreadsheet credentials, the camp-to-spreadsheet map and the
//! delivery queue, all persisted in the local store so a restart loses
//! nothing. Finalized records land in a per-camp ledger the moment they are
//! accepted; the spreadsheet catches up whenever a delivery succeeds.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use eyecamp_core::error::HandoffError;
use eyecamp_core::keys;
use eyecamp_core::models::PatientRecord;
use eyecamp_core::sink::RecordSink;
use eyecamp_core::store::LocalStore;

use crate::columns::{self, CampResources};
use crate::credentials::DriveCredentials;
use crate::error::SyncError;
use crate::queue::{self, PendingSync};
use crate::writer::{SheetUpdate, SheetWriter};

pub struct SyncService {
    store: Arc<dyn LocalStore>,
    writer: Arc<dyn SheetWriter>,
    state: Mutex<SyncState>,
    syncing: AtomicBool,
}

#[derive(Default)]
struct SyncState {
    credentials: Option<DriveCredentials>,
    queue: Vec<PendingSync>,
    resources: BTreeMap<String, CampResources>,
}

/// Outcome of one pass over the delivery queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub delivered: Vec<String>,
    /// Camp id and error message for each failed delivery.
    pub failed: Vec<(String, String)>,
    /// Nothing was attempted: another pass was running or there are no
    /// valid credentials.
    pub skipped: bool,
}

impl SyncReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Clears the in-progress flag when a queue pass ends, however it ends.
struct SyncingGuard<'a>(&'a AtomicBool);

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SyncService {
    /// Restore persisted state. Expired credentials are discarded.
    pub fn open(
        store: Arc<dyn LocalStore>,
        writer: Arc<dyn SheetWriter>,
    ) -> Result<Self, SyncError> {
        let mut credentials: Option<DriveCredentials> =
            read_json(store.as_ref(), keys::DRIVE_CREDENTIALS)?;
        if credentials.as_ref().is_some_and(|c| !c.is_valid()) {
            tracing::info!("stored spreadsheet credentials expired, discarding");
            store.remove(keys::DRIVE_CREDENTIALS)?;
            credentials = None;
        }
        let queue: Vec<PendingSync> =
            read_json(store.as_ref(), keys::SYNC_QUEUE)?.unwrap_or_default();
        let resources: BTreeMap<String, CampResources> =
            read_json(store.as_ref(), keys::CAMP_RESOURCES)?.unwrap_or_default();

        tracing::debug!(
            pending = queue.len(),
            camps = resources.len(),
            authenticated = credentials.is_some(),
            "sync service opened"
        );

        Ok(Self {
            store,
            writer,
            state: Mutex::new(SyncState {
                credentials,
                queue,
                resources,
            }),
            syncing: AtomicBool::new(false),
        })
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_credentials(&self, credentials: DriveCredentials) -> Result<(), SyncError> {
        write_json(self.store.as_ref(), keys::DRIVE_CREDENTIALS, &credentials)?;
        self.state().credentials = Some(credentials);
        tracing::info!("spreadsheet credentials updated");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    fn access_token(&self) -> Option<String> {
        self.state()
            .credentials
            .as_ref()
            .filter(|c| c.is_valid())
            .map(|c| c.access_token.clone())
    }

    pub fn logout(&self) -> Result<(), SyncError> {
        self.state().credentials = None;
        self.store.remove(keys::DRIVE_CREDENTIALS)?;
        tracing::info!("spreadsheet credentials cleared");
        Ok(())
    }

    /// Associate a camp with its spreadsheet.
    pub fn register_camp(&self, camp_id: &str, resources: CampResources) -> Result<(), SyncError> {
        let mut state = self.state();
        state.resources.insert(camp_id.to_string(), resources);
        write_json(self.store.as_ref(), keys::CAMP_RESOURCES, &state.resources)?;
        tracing::debug!(camp_id, "camp resources registered");
        Ok(())
    }

    pub fn resources_for(&self, camp_id: &str) -> Option<CampResources> {
        self.state().resources.get(camp_id).cloned()
    }

    pub fn pending(&self) -> Vec<PendingSync> {
        self.state().queue.clone()
    }

    /// Every accepted record for a camp, in acceptance order.
    pub fn camp_records(&self, camp_id: &str) -> Result<Vec<PatientRecord>, SyncError> {
        let ledger = read_json(self.store.as_ref(), &keys::camp_patients(camp_id))?;
        Ok(ledger.unwrap_or_default())
    }

    fn persist_queue(&self, queue: &[PendingSync]) -> Result<(), SyncError> {
        write_json(self.store.as_ref(), keys::SYNC_QUEUE, &queue)
    }

    fn mark_pending(&self, camp_id: &str, error: Option<&SyncError>) -> Result<(), SyncError> {
        let mut state = self.state();
        queue::touch(&mut state.queue, camp_id);
        if let Some(e) = error {
            queue::record_failure(&mut state.queue, camp_id, &e.to_string());
        }
        self.persist_queue(&state.queue)
    }

    /// Rewrite the camp's spreadsheet rows from its ledger now.
    ///
    /// On any failure the camp stays queued for [`Self::process_queue`].
    /// Returns the number of rows written.
    pub async fn sync_camp(&self, camp_id: &str) -> Result<usize, SyncError> {
        let Some(access_token) = self.access_token() else {
            self.mark_pending(camp_id, None)?;
            tracing::warn!(camp_id, "not authenticated, sync queued");
            return Err(SyncError::NotAuthenticated);
        };
        let Some(resources) = self.resources_for(camp_id) else {
            let err = SyncError::UnknownCamp(camp_id.to_string());
            self.mark_pending(camp_id, Some(&err))?;
            tracing::warn!(camp_id, "no spreadsheet for camp, sync queued");
            return Err(err);
        };

        let delivered = queue::revision(&self.state().queue, camp_id);
        let rows: Vec<Vec<String>> = self
            .camp_records(camp_id)?
            .iter()
            .map(columns::patient_row)
            .collect();
        let row_count = rows.len();

        let update = SheetUpdate {
            spreadsheet_id: resources.spreadsheet_id,
            range: columns::SHEET_RANGE.to_string(),
            rows,
            access_token,
        };

        match self.writer.update_values(update).await {
            Ok(()) => {
                let mut state = self.state();
                queue::settle(&mut state.queue, camp_id, delivered);
                self.persist_queue(&state.queue)?;
                tracing::info!(camp_id, rows = row_count, "camp synced to spreadsheet");
                Ok(row_count)
            }
            Err(e) => {
                self.mark_pending(camp_id, Some(&e))?;
                tracing::warn!(camp_id, error = %e, "spreadsheet sync failed, will retry");
                Err(e)
            }
        }
    }

    /// Replay every pending camp once. Only one pass runs at a time; a call
    /// made while another is in progress returns a skipped report.
    pub async fn process_queue(&self) -> SyncReport {
        if !self.is_authenticated() {
            return SyncReport::skipped();
        }
        if self.syncing.swap(true, Ordering::AcqRel) {
            tracing::debug!("sync pass already running");
            return SyncReport::skipped();
        }
        let _guard = SyncingGuard(&self.syncing);

        let camps: Vec<String> = self.pending().into_iter().map(|p| p.camp_id).collect();
        let mut report = SyncReport::default();
        for camp_id in camps {
            match self.sync_camp(&camp_id).await {
                Ok(_) => report.delivered.push(camp_id),
                Err(e) => report.failed.push((camp_id, e.to_string())),
            }
        }

        tracing::info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "sync queue processed"
        );
        report
    }
}

impl RecordSink for SyncService {
    /// Upsert the record into its camp's ledger and queue the camp. Never
    /// touches the network.
    fn accept(&self, record: &PatientRecord) -> Result<(), HandoffError> {
        if record.camp_id.is_empty() {
            return Err(HandoffError::MissingCamp);
        }
        let key = keys::camp_patients(&record.camp_id);

        let mut state = self.state();
        let mut ledger: Vec<PatientRecord> =
            read_json(self.store.as_ref(), &key)?.unwrap_or_default();
        match ledger
            .iter_mut()
            .find(|r| r.id.is_some() && r.id == record.id)
        {
            Some(existing) => *existing = record.clone(),
            None => ledger.push(record.clone()),
        }
        write_json(self.store.as_ref(), &key, &ledger)?;

        queue::touch(&mut state.queue, &record.camp_id);
        self.persist_queue(&state.queue)?;

        tracing::info!(
            camp_id = %record.camp_id,
            records = ledger.len(),
            pending = state.queue.len(),
            "record accepted for sync"
        );
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: &str,
) -> Result<Option<T>, SyncError> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn write_json<T: Serialize + ?Sized>(
    store: &dyn LocalStore,
    key: &str,
    value: &T,
) -> Result<(), SyncError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)?;
    Ok(())
}
