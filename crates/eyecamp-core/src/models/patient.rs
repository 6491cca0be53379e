use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::refraction::{Eye, EyePair, RefractionMeasurement, RefractionStage};
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const CHOICES: [&'static str; 3] = ["male", "female", "other"];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(CoreError::InvalidChoice {
                field: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// Disposition of the patient at the end of the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    /// Glass prescription.
    Glasses,
    /// Referred to hospital.
    Referred,
    /// Follow-up required.
    Followup,
    /// Normal, no treatment.
    Normal,
}

impl Outcome {
    pub const CHOICES: [&'static str; 4] = ["glasses", "referred", "followup", "normal"];

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Glasses => "glasses",
            Outcome::Referred => "referred",
            Outcome::Followup => "followup",
            Outcome::Normal => "normal",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glasses" => Ok(Outcome::Glasses),
            "referred" => Ok(Outcome::Referred),
            "followup" => Ok(Outcome::Followup),
            "normal" => Ok(Outcome::Normal),
            _ => Err(CoreError::InvalidChoice {
                field: "outcome",
                value: s.to_string(),
            }),
        }
    }
}

/// A patient seen at a camp. Text fields hold exactly what was entered;
/// unset values are empty strings so a stored draft reads back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct PatientRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<Uuid>,
    pub camp_id: String,

    pub name: String,
    pub age: String,
    #[serde(with = "blank")]
    #[ts(type = "string")]
    pub sex: Option<Sex>,

    pub history: String,

    pub distant_vision_right: String,
    pub distant_vision_left: String,
    pub near_vision_right: String,
    pub near_vision_left: String,

    pub dry_refraction: EyePair<RefractionMeasurement>,
    pub acceptance: EyePair<RefractionMeasurement>,
    pub add_given: EyePair<RefractionMeasurement>,

    pub ocular_diagnosis: String,

    #[serde(with = "blank")]
    #[ts(type = "string")]
    pub outcome: Option<Outcome>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub created_at: Option<jiff::Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub updated_at: Option<jiff::Timestamp>,
}

impl PatientRecord {
    pub fn new(camp_id: impl Into<String>) -> Self {
        Self {
            camp_id: camp_id.into(),
            ..Self::default()
        }
    }

    pub fn refraction(&self, stage: RefractionStage) -> &EyePair<RefractionMeasurement> {
        match stage {
            RefractionStage::Dry => &self.dry_refraction,
            RefractionStage::Acceptance => &self.acceptance,
            RefractionStage::AddGiven => &self.add_given,
        }
    }

    pub fn refraction_mut(
        &mut self,
        stage: RefractionStage,
    ) -> &mut EyePair<RefractionMeasurement> {
        match stage {
            RefractionStage::Dry => &mut self.dry_refraction,
            RefractionStage::Acceptance => &mut self.acceptance,
            RefractionStage::AddGiven => &mut self.add_given,
        }
    }

    pub fn distant_vision(&self, eye: Eye) -> &str {
        match eye {
            Eye::Right => &self.distant_vision_right,
            Eye::Left => &self.distant_vision_left,
        }
    }

    pub fn near_vision(&self, eye: Eye) -> &str {
        match eye {
            Eye::Right => &self.near_vision_right,
            Eye::Left => &self.near_vision_left,
        }
    }
}

/// Serde adapter for optional choices: `None` is written as `""` and an
/// empty string reads back as `None`.
mod blank {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(de::Error::custom)
    }
}
