//! A running eyecamp instance: one local store shared by the intake engine
//! and the sync service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyecamp_core::sink::RecordSink;
use eyecamp_core::store::{FileStore, LocalStore};
use eyecamp_intake::draft::DraftStore;
use eyecamp_intake::engine::IntakeForm;
use eyecamp_sync::service::{SyncReport, SyncService};
use eyecamp_sync::writer::{SheetWriter, SheetsApiWriter};

use crate::config::AppConfig;

pub struct Session {
    config: AppConfig,
    store: Arc<dyn LocalStore>,
    sync: Arc<SyncService>,
}

impl Session {
    /// Open the store under `config.data_dir` and deliver over the Sheets API.
    pub fn open(config: AppConfig) -> eyre::Result<Self> {
        let writer = SheetsApiWriter::new(
            config.sheets_api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
        );
        Self::with_writer(config, Arc::new(writer))
    }

    pub fn with_writer(config: AppConfig, writer: Arc<dyn SheetWriter>) -> eyre::Result<Self> {
        let root = store_root(&config);
        std::fs::create_dir_all(&root)
            .map_err(|e| eyre::eyre!("failed to create data dir {}: {e}", root.display()))?;

        let store: Arc<dyn LocalStore> = Arc::new(FileStore::new(&root));
        let sync = Arc::new(SyncService::open(store.clone(), writer)?);

        tracing::info!(
            data_dir = %root.display(),
            draft_slot = ?config.draft_slot,
            mode = ?config.intake_mode,
            "session opened"
        );
        Ok(Self {
            config,
            store,
            sync,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sync(&self) -> &SyncService {
        &self.sync
    }

    fn drafts(&self) -> DraftStore {
        DraftStore::new(self.store.clone(), self.config.draft_slot)
    }

    fn sink(&self) -> Arc<dyn RecordSink> {
        self.sync.clone()
    }

    /// A blank intake form for `camp_id` whose submissions go to the sync
    /// service.
    pub fn start_intake(&self, camp_id: &str) -> IntakeForm {
        IntakeForm::new(camp_id, self.config.intake_mode, self.drafts(), self.sink())
    }

    /// Reopen the draft saved under `key`, if there is one.
    pub fn resume_intake(&self, key: &str) -> eyre::Result<Option<IntakeForm>> {
        let drafts = self.drafts();
        let Some(draft) = drafts.load(key)? else {
            return Ok(None);
        };
        Ok(Some(IntakeForm::resume(
            draft,
            self.config.intake_mode,
            drafts,
            self.sink(),
        )))
    }

    /// One pass over the delivery queue.
    pub async fn sync_pending(&self) -> SyncReport {
        self.sync.process_queue().await
    }
}

fn store_root(config: &AppConfig) -> PathBuf {
    config.data_dir.join("store")
}
