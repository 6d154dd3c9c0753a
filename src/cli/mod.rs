//! CLI-facing workflow entry points

pub mod orchestration;

pub use orchestration::{resolve_version_path, run_bump_workflow, BumpOutcome};
