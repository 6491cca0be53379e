use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The six sections of the intake form, in wizard order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SectionId {
    Demographics,
    History,
    Vision,
    Refraction,
    Diagnosis,
    Outcome,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Demographics,
        SectionId::History,
        SectionId::Vision,
        SectionId::Refraction,
        SectionId::Diagnosis,
        SectionId::Outcome,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Demographics => "demographics",
            SectionId::History => "history",
            SectionId::Vision => "vision",
            SectionId::Refraction => "refraction",
            SectionId::Diagnosis => "diagnosis",
            SectionId::Outcome => "outcome",
        }
    }

    /// Zero-based position in wizard order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<SectionId> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<SectionId> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CoreError::InvalidChoice {
                field: "section",
                value: s.to_string(),
            })
    }
}
