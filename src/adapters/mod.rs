//! Infrastructure adapters for external systems.

pub mod contributors;
pub mod git;
