use crate::error::{BumpError, Result};
use git2::{Repository as Git2Repo, Status, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// [Repository](super::Repository) backed by libgit2
///
/// The repository is discovered from `workdir` on every call rather than
/// once up front, so a missing repository surfaces at the first query.
pub struct Git2Repository {
    workdir: PathBuf,
}

impl Git2Repository {
    /// Create a handle that discovers the repository from `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Git2Repository {
            workdir: workdir.into(),
        }
    }

    fn open(&self) -> Result<Git2Repo> {
        Git2Repo::discover(&self.workdir).map_err(|e| {
            BumpError::repository_query(format!(
                "Not in a git repository ({}): {}",
                self.workdir.display(),
                e.message()
            ))
        })
    }
}

/// Express `path` relative to the repository's working directory.
fn relative_path(repo: &Git2Repo, path: &Path) -> Result<PathBuf> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| BumpError::repository_query("Repository has no working directory"))?;

    let canonical = |p: &Path| {
        p.canonicalize().map_err(|e| {
            BumpError::repository_query(format!("Cannot canonicalize {}: {}", p.display(), e))
        })
    };

    let root = canonical(workdir)?;
    let file = canonical(path)?;

    file.strip_prefix(&root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            BumpError::repository_query(format!(
                "{} is outside the repository at {}",
                path.display(),
                root.display()
            ))
        })
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let repo = self.open()?;
        let head = repo.head().map_err(|e| {
            BumpError::repository_query(format!("Cannot resolve HEAD: {}", e.message()))
        })?;

        // Mirrors `git rev-parse --abbrev-ref HEAD` on a detached HEAD
        if !head.is_branch() {
            return Ok("HEAD".to_string());
        }

        head.shorthand()
            .map(String::from)
            .ok_or_else(|| BumpError::repository_query("Branch name is not valid UTF-8"))
    }

    fn is_dirty(&self) -> Result<bool> {
        let repo = self.open()?;
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = repo.statuses(Some(&mut options)).map_err(|e| {
            BumpError::repository_query(format!("Cannot read status: {}", e.message()))
        })?;

        debug!(entries = statuses.len(), "working tree status");
        Ok(!statuses.is_empty())
    }

    fn has_changed(&self, path: &Path) -> Result<bool> {
        let repo = self.open()?;
        let relative = relative_path(&repo, path)?;

        let status = repo.status_file(&relative).map_err(|e| {
            BumpError::repository_query(format!(
                "Cannot read status of {}: {}",
                relative.display(),
                e.message()
            ))
        })?;

        debug!(path = %relative.display(), ?status, "file status");
        Ok(status.intersects(
            Status::WT_MODIFIED | Status::WT_DELETED | Status::WT_TYPECHANGE | Status::WT_RENAMED,
        ))
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        let fail =
            |what: &str, e: git2::Error| BumpError::commit(format!("{}: {}", what, e.message()));

        let repo = self.open()?;
        let relative = relative_path(&repo, path)?;

        let mut index = repo.index().map_err(|e| fail("Cannot open index", e))?;
        index
            .add_path(&relative)
            .map_err(|e| fail("Cannot stage file", e))?;
        index.write().map_err(|e| fail("Cannot write index", e))?;

        let tree_id = index.write_tree().map_err(|e| fail("Cannot write tree", e))?;
        let tree = repo
            .find_tree(tree_id)
            .map_err(|e| fail("Cannot find tree", e))?;

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        if parent.as_ref().map(|c| c.tree_id()) == Some(tree_id) {
            return Err(BumpError::commit(format!(
                "nothing to commit for {}",
                relative.display()
            )));
        }

        let signature = repo
            .signature()
            .map_err(|e| fail("Cannot determine committer identity", e))?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| fail("Cannot create commit", e))?;

        info!(commit = %oid, path = %relative.display(), "created commit");
        Ok(())
    }
}
