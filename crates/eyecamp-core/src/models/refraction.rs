use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::notation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Eye {
    /// OD
    Right,
    /// OS
    Left,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Right, Eye::Left];

    pub fn label(self) -> &'static str {
        match self {
            Eye::Right => "Right",
            Eye::Left => "Left",
        }
    }
}

/// The point in the exam a refraction was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum RefractionStage {
    /// Objective refraction before subjective refinement.
    Dry,
    /// The refined prescription the patient accepts.
    Acceptance,
    /// Near addition on top of the distance correction.
    AddGiven,
}

impl RefractionStage {
    pub const ALL: [RefractionStage; 3] = [
        RefractionStage::Dry,
        RefractionStage::Acceptance,
        RefractionStage::AddGiven,
    ];

    pub fn title(self) -> &'static str {
        match self {
            RefractionStage::Dry => "Dry Refraction",
            RefractionStage::Acceptance => "Acceptance",
            RefractionStage::AddGiven => "Add Given",
        }
    }
}

/// One value per eye.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EyePair<T> {
    pub right: T,
    pub left: T,
}

impl<T> EyePair<T> {
    pub fn get(&self, eye: Eye) -> &T {
        match eye {
            Eye::Right => &self.right,
            Eye::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, eye: Eye) -> &mut T {
        match eye {
            Eye::Right => &mut self.right,
            Eye::Left => &mut self.left,
        }
    }
}

/// A single-eye refraction as entered: sign toggles plus magnitudes kept as
/// the text the examiner typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct RefractionMeasurement {
    pub sphere: String,
    pub sphere_positive: bool,
    pub cylinder: String,
    pub cylinder_positive: bool,
    pub axis: String,
    pub note: String,
}

impl Default for RefractionMeasurement {
    fn default() -> Self {
        Self {
            sphere: String::new(),
            sphere_positive: true,
            cylinder: String::new(),
            cylinder_positive: false,
            axis: String::new(),
            note: String::new(),
        }
    }
}

impl RefractionMeasurement {
    /// Standard prescription shorthand, e.g. `+1.00DS/-0.50DCx180`.
    pub fn notation(&self) -> String {
        notation::encode(
            self.sphere_positive,
            &self.sphere,
            self.cylinder_positive,
            &self.cylinder,
            &self.axis,
        )
    }

    /// True when any of sphere, cylinder or axis has been entered.
    pub fn has_values(&self) -> bool {
        !self.sphere.is_empty() || !self.cylinder.is_empty() || !self.axis.is_empty()
    }

    /// An axis with no cylinder to orient. The encoder drops it.
    pub fn has_orphan_axis(&self) -> bool {
        !self.axis.is_empty() && self.cylinder.is_empty()
    }
}
