//! Main workflow orchestration logic
//!
//! Runs the bump-and-commit sequence against any [Repository]. CLI parsing
//! and output formatting stay in `main.rs` and [crate::ui].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::BumpConfig;
use crate::domain::Version;
use crate::error::{BumpError, Result};
use crate::git::Repository;

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    /// Absolute path of the version file
    pub path: PathBuf,

    /// Version read from the file
    pub previous: Version,

    /// Version computed by the bump
    pub current: Version,

    /// Message used (or that would be used) for the commit
    pub commit_message: String,

    /// False for dry runs, where nothing was written or committed
    pub committed: bool,
}

/// Resolve the version file path against the process working directory.
pub fn resolve_version_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| BumpError::PathResolution {
        path: path.to_path_buf(),
        source,
    })
}

/// Main bump workflow
///
/// Steps, each aborting the run on failure:
/// 1. Resolve the version file and check it exists
/// 2. Refuse to run on the protected branch
/// 3. Refuse to run with uncommitted changes
/// 4. Parse and bump the version
/// 5. Write the new version and confirm the file changed
/// 6. Commit the file
///
/// With `config.dry_run` set the workflow stops after step 4.
pub fn run_bump_workflow<R>(config: &BumpConfig, repo: &R) -> Result<BumpOutcome>
where
    R: Repository + ?Sized,
{
    let path = resolve_version_path(&config.file_path)?;
    debug!(path = %path.display(), "resolved version file");

    if !path.is_file() {
        return Err(BumpError::FileNotFound { path });
    }

    let branch = repo.current_branch()?;
    debug!(%branch, main_branch = %config.main_branch, "checked current branch");
    if branch == config.main_branch {
        return Err(BumpError::ProtectedBranch { branch });
    }

    if repo.is_dirty()? {
        return Err(BumpError::DirtyWorkingTree);
    }

    let bytes = fs::read(&path).map_err(|source| BumpError::FileRead {
        path: path.clone(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| {
        BumpError::malformed(
            String::from_utf8_lossy(e.as_bytes()),
            "file content is not valid UTF-8",
        )
    })?;

    let previous = Version::parse(&content)?;
    let bump = config.bump();
    let current = previous.bump(bump)?;
    let commit_message = config.commit_message_for(&current);
    debug!(%previous, %current, %bump, "computed new version");

    let mut outcome = BumpOutcome {
        path,
        previous,
        current,
        commit_message,
        committed: false,
    };

    if config.dry_run {
        return Ok(outcome);
    }

    fs::write(&outcome.path, current.to_string()).map_err(|source| BumpError::FileWrite {
        path: outcome.path.clone(),
        source,
    })?;

    if !repo.has_changed(&outcome.path)? {
        return Err(BumpError::NoChange { path: outcome.path });
    }

    repo.commit(&outcome.path, &outcome.commit_message)?;
    info!(version = %current, commit_message = %outcome.commit_message, "committed version bump");

    outcome.committed = true;
    Ok(outcome)
}
