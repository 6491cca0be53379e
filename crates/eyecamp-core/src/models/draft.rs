use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::patient::PatientRecord;
use super::section::SectionId;
use crate::error::CoreError;

/// A locally checkpointed, not-yet-submitted patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Draft {
    pub data: PatientRecord,
    pub camp_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub patient_id: Option<Uuid>,
    pub active_section: SectionId,
    pub timestamp: jiff::Timestamp,
}

impl Draft {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
