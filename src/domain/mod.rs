//! Domain layer for the commit signature gate
//!
//! Models, errors and the ports adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ExtractionError, GateError, GateResult, SignatureField};
