//! Field registry.
//!
//! Every writable form field has a flat name (the one the front end binds to,
//! e.g. `acceptanceLeftCyl`), a home section, a kind, and a path into
//! [`PatientRecord`]. Names not in the registry cannot be read or written.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use eyecamp_core::models::{Eye, Outcome, PatientRecord, RefractionStage, SectionId, Sex};

use crate::error::IntakeError;

/// A value written to or read from a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free or numeric text, stored exactly as entered.
    Text,
    /// A sign toggle.
    Flag,
    /// One of a fixed set of values, or empty.
    Choice(&'static [&'static str]),
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Flag => "a sign toggle",
            FieldKind::Choice(_) => "a choice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementPart {
    Sphere,
    SpherePositive,
    Cylinder,
    CylinderPositive,
    Axis,
    Note,
}

impl MeasurementPart {
    const ALL: [MeasurementPart; 6] = [
        MeasurementPart::Sphere,
        MeasurementPart::SpherePositive,
        MeasurementPart::Cylinder,
        MeasurementPart::CylinderPositive,
        MeasurementPart::Axis,
        MeasurementPart::Note,
    ];

    fn suffix(self) -> &'static str {
        match self {
            MeasurementPart::Sphere => "Sph",
            MeasurementPart::SpherePositive => "SphPositive",
            MeasurementPart::Cylinder => "Cyl",
            MeasurementPart::CylinderPositive => "CylPositive",
            MeasurementPart::Axis => "Axis",
            MeasurementPart::Note => "RefractionNote",
        }
    }
}

/// Where a field lives inside a [`PatientRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Name,
    Age,
    Sex,
    History,
    DistantVision(Eye),
    NearVision(Eye),
    Refraction {
        stage: RefractionStage,
        eye: Eye,
        part: MeasurementPart,
    },
    OcularDiagnosis,
    Outcome,
}

impl FieldPath {
    pub fn name(self) -> String {
        match self {
            FieldPath::Name => "name".to_string(),
            FieldPath::Age => "age".to_string(),
            FieldPath::Sex => "sex".to_string(),
            FieldPath::History => "history".to_string(),
            FieldPath::DistantVision(eye) => format!("distantVision{}", eye.label()),
            FieldPath::NearVision(eye) => format!("nearVision{}", eye.label()),
            FieldPath::Refraction { stage, eye, part } => {
                format!("{}{}", refraction_prefix(stage, eye), part.suffix())
            }
            FieldPath::OcularDiagnosis => "ocularDiagnosis".to_string(),
            FieldPath::Outcome => "outcome".to_string(),
        }
    }

    pub fn section(self) -> SectionId {
        match self {
            FieldPath::Name | FieldPath::Age | FieldPath::Sex => SectionId::Demographics,
            FieldPath::History => SectionId::History,
            FieldPath::DistantVision(_) | FieldPath::NearVision(_) => SectionId::Vision,
            FieldPath::Refraction { .. } => SectionId::Refraction,
            FieldPath::OcularDiagnosis => SectionId::Diagnosis,
            FieldPath::Outcome => SectionId::Outcome,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldPath::Sex => FieldKind::Choice(&Sex::CHOICES),
            FieldPath::Outcome => FieldKind::Choice(&Outcome::CHOICES),
            FieldPath::Refraction {
                part: MeasurementPart::SpherePositive | MeasurementPart::CylinderPositive,
                ..
            } => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    /// The field's text, or `""` for unset choices. Flags read as `None`.
    pub fn text(self, record: &PatientRecord) -> Option<&str> {
        let text: &str = match self {
            FieldPath::Name => &record.name,
            FieldPath::Age => &record.age,
            FieldPath::Sex => return Some(record.sex.map_or("", Sex::as_str)),
            FieldPath::History => &record.history,
            FieldPath::DistantVision(eye) => record.distant_vision(eye),
            FieldPath::NearVision(eye) => record.near_vision(eye),
            FieldPath::Refraction { stage, eye, part } => {
                let m = record.refraction(stage).get(eye);
                match part {
                    MeasurementPart::Sphere => &m.sphere,
                    MeasurementPart::Cylinder => &m.cylinder,
                    MeasurementPart::Axis => &m.axis,
                    MeasurementPart::Note => &m.note,
                    MeasurementPart::SpherePositive | MeasurementPart::CylinderPositive => {
                        return None;
                    }
                }
            }
            FieldPath::OcularDiagnosis => &record.ocular_diagnosis,
            FieldPath::Outcome => return Some(record.outcome.map_or("", Outcome::as_str)),
        };
        Some(text)
    }

    pub fn read(self, record: &PatientRecord) -> FieldValue {
        if let FieldPath::Refraction { stage, eye, part } = self {
            let m = record.refraction(stage).get(eye);
            match part {
                MeasurementPart::SpherePositive => return FieldValue::Flag(m.sphere_positive),
                MeasurementPart::CylinderPositive => {
                    return FieldValue::Flag(m.cylinder_positive);
                }
                _ => {}
            }
        }
        FieldValue::Text(self.text(record).unwrap_or_default().to_string())
    }

    /// Store `value`, rejecting values of the wrong kind or outside a choice set.
    pub fn write(self, record: &mut PatientRecord, value: FieldValue) -> Result<(), IntakeError> {
        let wrong_kind = || IntakeError::FieldKind {
            field: self.name(),
            expected: self.kind().describe(),
        };

        match (self, value) {
            (FieldPath::Refraction { stage, eye, part }, value) => {
                let m = record.refraction_mut(stage).get_mut(eye);
                match (part, value) {
                    (MeasurementPart::SpherePositive, FieldValue::Flag(b)) => m.sphere_positive = b,
                    (MeasurementPart::CylinderPositive, FieldValue::Flag(b)) => {
                        m.cylinder_positive = b
                    }
                    (MeasurementPart::Sphere, FieldValue::Text(t)) => m.sphere = t,
                    (MeasurementPart::Cylinder, FieldValue::Text(t)) => m.cylinder = t,
                    (MeasurementPart::Axis, FieldValue::Text(t)) => m.axis = t,
                    (MeasurementPart::Note, FieldValue::Text(t)) => m.note = t,
                    _ => return Err(wrong_kind()),
                }
            }
            (_, FieldValue::Flag(_)) => return Err(wrong_kind()),
            (FieldPath::Name, FieldValue::Text(t)) => record.name = t,
            (FieldPath::Age, FieldValue::Text(t)) => record.age = t,
            (FieldPath::Sex, FieldValue::Text(t)) => record.sex = parse_choice(self, t)?,
            (FieldPath::History, FieldValue::Text(t)) => record.history = t,
            (FieldPath::DistantVision(Eye::Right), FieldValue::Text(t)) => {
                record.distant_vision_right = t
            }
            (FieldPath::DistantVision(Eye::Left), FieldValue::Text(t)) => {
                record.distant_vision_left = t
            }
            (FieldPath::NearVision(Eye::Right), FieldValue::Text(t)) => record.near_vision_right = t,
            (FieldPath::NearVision(Eye::Left), FieldValue::Text(t)) => record.near_vision_left = t,
            (FieldPath::OcularDiagnosis, FieldValue::Text(t)) => record.ocular_diagnosis = t,
            (FieldPath::Outcome, FieldValue::Text(t)) => record.outcome = parse_choice(self, t)?,
        }
        Ok(())
    }
}

fn parse_choice<T: std::str::FromStr>(
    path: FieldPath,
    text: String,
) -> Result<Option<T>, IntakeError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| IntakeError::InvalidChoice {
            field: path.name(),
            value: text,
        })
}

/// Name prefix for a refraction field: `rightEye`/`leftEye` for the dry
/// refraction, `acceptanceRight`, `addGivenLeft`, and so on for the others.
fn refraction_prefix(stage: RefractionStage, eye: Eye) -> String {
    match stage {
        RefractionStage::Dry => format!("{}Eye", eye.label().to_lowercase()),
        RefractionStage::Acceptance => format!("acceptance{}", eye.label()),
        RefractionStage::AddGiven => format!("addGiven{}", eye.label()),
    }
}

/// A registered field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub path: FieldPath,
}

/// Every field in form order.
pub fn all() -> &'static [FieldSpec] {
    static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
        let mut paths = vec![
            FieldPath::Name,
            FieldPath::Age,
            FieldPath::Sex,
            FieldPath::History,
        ];
        for eye in Eye::BOTH {
            paths.push(FieldPath::DistantVision(eye));
        }
        for eye in Eye::BOTH {
            paths.push(FieldPath::NearVision(eye));
        }
        for stage in RefractionStage::ALL {
            for eye in Eye::BOTH {
                for part in MeasurementPart::ALL {
                    paths.push(FieldPath::Refraction { stage, eye, part });
                }
            }
        }
        paths.push(FieldPath::OcularDiagnosis);
        paths.push(FieldPath::Outcome);

        paths
            .into_iter()
            .map(|path| FieldSpec {
                name: path.name(),
                path,
            })
            .collect()
    });
    &FIELDS
}

/// Resolve a field name to its path.
pub fn lookup(name: &str) -> Option<FieldPath> {
    all().iter().find(|f| f.name == name).map(|f| f.path)
}

/// The fields that belong to `section`.
pub fn in_section(section: SectionId) -> impl Iterator<Item = &'static FieldSpec> {
    all().iter().filter(move |f| f.path.section() == section)
}
