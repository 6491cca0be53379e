pub mod demographics;
pub mod diagnosis;
pub mod history;
pub mod outcome;
pub mod refraction;
pub mod vision;
