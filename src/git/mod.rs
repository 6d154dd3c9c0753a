//! Version-control abstraction layer
//!
//! The bump workflow only needs four questions answered by the repository,
//! so they live behind the [Repository] trait. Implementations:
//!
//! - [cli::GitCli]: shells out to the `git` binary (default)
//! - [repository::Git2Repository]: talks to libgit2 through the `git2` crate
//! - [mock::MockRepository]: in-memory fake for tests
//!
//! ```rust
//! # use bump_version::git::Repository;
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> bump_version::Result<()> {
//! if repo.current_branch()? != "main" && !repo.is_dirty()? {
//!     repo.commit(Path::new("VERSION"), "release: v1.2.4")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BumpError, Result};

/// Version-control operations required by the bump workflow
///
/// Implementations map their underlying failures to
/// [BumpError::RepositoryQuery] for the query methods and to
/// [BumpError::Commit] for [Repository::commit].
pub trait Repository: Send + Sync {
    /// Name of the checked-out branch, or `HEAD` when detached.
    fn current_branch(&self) -> Result<String>;

    /// Whether the working tree has any pending change, untracked files included.
    fn is_dirty(&self) -> Result<bool>;

    /// Whether `path` differs from its recorded state in the index.
    ///
    /// # Arguments
    /// * `path` - Absolute path of a file inside the working tree
    fn has_changed(&self, path: &Path) -> Result<bool>;

    /// Commit exactly `path` with the given message.
    fn commit(&self, path: &Path, message: &str) -> Result<()>;
}

/// Which [Repository] implementation the binary should drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// External `git` command
    #[default]
    Cli,
    /// Embedded libgit2
    Libgit2,
}

impl Backend {
    /// Build the repository handle for this backend rooted at `workdir`.
    pub fn open(self, workdir: impl Into<PathBuf>) -> Box<dyn Repository> {
        match self {
            Backend::Cli => Box::new(GitCli::new(workdir)),
            Backend::Libgit2 => Box::new(Git2Repository::new(workdir)),
        }
    }
}

impl FromStr for Backend {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cli" | "git" => Ok(Backend::Cli),
            "libgit2" | "git2" => Ok(Backend::Libgit2),
            other => Err(BumpError::config(format!(
                "Unknown backend '{}': expected 'cli' or 'libgit2'",
                other
            ))),
        }
    }
}
