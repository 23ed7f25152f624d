//! CLI command implementations.

pub mod check;
pub mod contributors;
pub mod inspect;
