pub mod camp;
pub mod draft;
pub mod patient;
pub mod refraction;
pub mod section;

pub use camp::Camp;
pub use draft::Draft;
pub use patient::{Outcome, PatientRecord, Sex};
pub use refraction::{Eye, EyePair, RefractionMeasurement, RefractionStage};
pub use section::SectionId;
