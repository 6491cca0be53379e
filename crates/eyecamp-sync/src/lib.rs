//! eyecamp-sync
//!
//! Delivers finalized patient records to a per-camp spreadsheet. Records are
//! accepted into a local ledger immediately; delivery happens later from a
//! persisted queue and is retried until the remote write succeeds.

pub mod columns;
pub mod credentials;
pub mod error;
pub mod queue;
pub mod service;
pub mod writer;
