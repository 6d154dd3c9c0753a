//! Domain logic - pure business rules independent of git operations

pub mod version;

pub use version::{Version, VersionBump};
