//! Spreadsheet layout for patient records.

use serde::{Deserialize, Serialize};

use eyecamp_core::models::{Camp, Eye, PatientRecord, RefractionStage};

pub const SHEET_NAME: &str = "Patient Records";

/// Data rows start below the header row and span columns A through O.
pub const SHEET_RANGE: &str = "Patient Records!A2:O";

pub const HEADERS: [&str; 15] = [
    "Patient ID",
    "Name",
    "Age",
    "Sex",
    "History",
    "Vision Right",
    "Vision Left",
    "Dry Refraction Right",
    "Dry Refraction Left",
    "Acceptance Right",
    "Acceptance Left",
    "Ocular Diagnosis",
    "Outcome",
    "Created At",
    "Updated At",
];

/// Remote resources created for a camp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampResources {
    pub spreadsheet_id: String,
    pub folder_id: String,
    pub spreadsheet_url: String,
    pub folder_url: String,
}

/// Folder name for a camp, e.g. `Eye Camp - Rampur (Mar 14, 2026)`.
pub fn camp_folder_name(camp: &Camp) -> String {
    format!("Eye Camp - {} ({})", camp.name, camp.date.strftime("%b %d, %Y"))
}

/// One spreadsheet row, in [`HEADERS`] order.
pub fn patient_row(record: &PatientRecord) -> Vec<String> {
    let refraction = |stage: RefractionStage, eye: Eye| record.refraction(stage).get(eye).notation();
    let timestamp = |t: Option<jiff::Timestamp>| t.map(|t| t.to_string()).unwrap_or_default();

    vec![
        record.id.map(|id| id.to_string()).unwrap_or_default(),
        record.name.clone(),
        record.age.clone(),
        record.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
        record.history.clone(),
        vision(record, Eye::Right),
        vision(record, Eye::Left),
        refraction(RefractionStage::Dry, Eye::Right),
        refraction(RefractionStage::Dry, Eye::Left),
        refraction(RefractionStage::Acceptance, Eye::Right),
        refraction(RefractionStage::Acceptance, Eye::Left),
        record.ocular_diagnosis.clone(),
        record.outcome.map(|o| o.as_str().to_string()).unwrap_or_default(),
        timestamp(record.created_at),
        timestamp(record.updated_at),
    ]
}

/// Distance and near acuity for one eye in a single cell.
fn vision(record: &PatientRecord, eye: Eye) -> String {
    [record.distant_vision(eye), record.near_vision(eye)]
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
