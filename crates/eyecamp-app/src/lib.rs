//! eyecamp-app library root.
//!
//! Configuration, logging setup and the session that wires the local store,
//! the intake engine and the sync service together. Exposed as a library so
//! integration tests can drive a session without the binary.

pub mod config;
pub mod logging;
pub mod session;
