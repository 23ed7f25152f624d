//! Contributor source adapter implementations.

pub mod directory;

pub use directory::DirectoryContributorSource;
