use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for bump-version operations
///
/// Every variant is terminal: the workflow stops at the first one raised.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Error resolving path '{}': {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("VERSION file not found at {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Error reading file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository query failed: {0}")]
    RepositoryQuery(String),

    #[error("Cannot bump version on '{branch}' branch")]
    ProtectedBranch { branch: String },

    #[error("Cannot bump because there are uncommitted changes")]
    DirtyWorkingTree,

    #[error("Invalid version format '{content}': {reason}")]
    MalformedVersion { content: String, reason: String },

    #[error("Error writing to {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version has not changed in {}", .path.display())]
    NoChange { path: PathBuf },

    #[error("Error committing the version change: {0}")]
    Commit(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in bump-version
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a repository query error with context
    pub fn repository_query(msg: impl Into<String>) -> Self {
        BumpError::RepositoryQuery(msg.into())
    }

    /// Create a malformed version error for the given file content
    pub fn malformed(content: impl Into<String>, reason: impl Into<String>) -> Self {
        BumpError::MalformedVersion {
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Create a commit error with context
    pub fn commit(msg: impl Into<String>) -> Self {
        BumpError::Commit(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }
}
