use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eyecamp_core::keys;
use eyecamp_core::models::Draft;
use eyecamp_core::store::LocalStore;

use crate::error::IntakeError;

/// Where drafts are written in the local store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSlot {
    /// One slot per camp and patient; in-progress patients never collide.
    #[default]
    PerRecord,
    /// A single global slot. Each save replaces whatever draft was there.
    Shared,
}

impl DraftSlot {
    pub fn key(self, camp_id: &str, patient_id: Option<Uuid>) -> String {
        match self {
            DraftSlot::PerRecord => keys::draft(camp_id, patient_id),
            DraftSlot::Shared => keys::SHARED_DRAFT.to_string(),
        }
    }
}

/// Draft checkpointing on top of a local store.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn LocalStore>,
    slot: DraftSlot,
}

impl DraftStore {
    pub fn new(store: Arc<dyn LocalStore>, slot: DraftSlot) -> Self {
        Self { store, slot }
    }

    pub fn slot(&self) -> DraftSlot {
        self.slot
    }

    pub fn key_for(&self, draft: &Draft) -> String {
        self.slot.key(&draft.camp_id, draft.patient_id)
    }

    /// Write `draft` synchronously and return the key it was stored under.
    pub fn save(&self, draft: &Draft) -> Result<String, IntakeError> {
        let key = self.key_for(draft);

        if self.slot == DraftSlot::Shared
            && let Ok(Some(previous)) = self.load(&key)
            && (previous.camp_id != draft.camp_id || previous.patient_id != draft.patient_id)
        {
            tracing::warn!(
                key = %key,
                previous_camp = %previous.camp_id,
                camp_id = %draft.camp_id,
                "shared draft slot overwritten by a different patient"
            );
        }

        let json = draft.to_json()?;
        self.store.set(&key, &json)?;
        tracing::debug!(key = %key, section = %draft.active_section, "draft saved");
        Ok(key)
    }

    pub fn load(&self, key: &str) -> Result<Option<Draft>, IntakeError> {
        match self.store.get(key)? {
            Some(json) => Ok(Some(Draft::from_json(&json)?)),
            None => Ok(None),
        }
    }

    pub fn clear(&self, key: &str) -> Result<(), IntakeError> {
        self.store.remove(key)?;
        Ok(())
    }
}
