//! Version-control adapter implementations.

pub mod cli;
pub mod mock;

pub use cli::{GitCli, GitCliConfig};
pub use mock::{MockVersionControl, ScriptedVerification, good_signature_diagnostics};
