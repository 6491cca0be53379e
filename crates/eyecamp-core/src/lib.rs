//! eyecamp-core
//!
//! Pure domain types, refraction and acuity notation, local storage key
//! conventions, and the collaborator traits the intake engine and the sync
//! service meet at. This is the shared vocabulary of the eye-camp system.

pub mod error;
pub mod keys;
pub mod models;
pub mod notation;
pub mod sink;
pub mod store;
