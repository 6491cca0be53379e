use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An outreach camp. Owned by the camp registry; patients only carry its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Camp {
    pub id: String,
    pub name: String,
    pub location: String,
    pub date: jiff::civil::Date,
}
