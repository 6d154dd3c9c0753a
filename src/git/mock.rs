use crate::error::{BumpError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A commit captured by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub path: PathBuf,
    pub message: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: String,
    dirty: bool,
    reports_changes: bool,
    branch_error: Option<String>,
    status_error: Option<String>,
    commit_error: Option<String>,
    commits: Mutex<Vec<RecordedCommit>>,
}

impl MockRepository {
    /// Create a clean mock repository checked out on `branch`
    pub fn new(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: branch.into(),
            dirty: false,
            reports_changes: true,
            branch_error: None,
            status_error: None,
            commit_error: None,
            commits: Mutex::new(Vec::new()),
        }
    }

    /// Report uncommitted changes in the working tree
    pub fn with_dirty_tree(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Report every file as identical to its recorded state
    pub fn without_changes(mut self) -> Self {
        self.reports_changes = false;
        self
    }

    /// Fail the branch query with the given message
    pub fn with_branch_error(mut self, msg: impl Into<String>) -> Self {
        self.branch_error = Some(msg.into());
        self
    }

    /// Fail the status query with the given message
    pub fn with_status_error(mut self, msg: impl Into<String>) -> Self {
        self.status_error = Some(msg.into());
        self
    }

    /// Fail every commit with the given message
    pub fn with_commit_error(mut self, msg: impl Into<String>) -> Self {
        self.commit_error = Some(msg.into());
        self
    }

    /// Commits created so far, oldest first
    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.commits
            .lock()
            .map(|commits| commits.clone())
            .unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("feature")
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        match &self.branch_error {
            Some(msg) => Err(BumpError::repository_query(msg.clone())),
            None => Ok(self.branch.clone()),
        }
    }

    fn is_dirty(&self) -> Result<bool> {
        match &self.status_error {
            Some(msg) => Err(BumpError::repository_query(msg.clone())),
            None => Ok(self.dirty),
        }
    }

    fn has_changed(&self, _path: &Path) -> Result<bool> {
        Ok(self.reports_changes)
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        if let Some(msg) = &self.commit_error {
            return Err(BumpError::commit(msg.clone()));
        }

        let mut commits = self
            .commits
            .lock()
            .map_err(|_| BumpError::commit("mock commit log poisoned"))?;
        commits.push(RecordedCommit {
            path: path.to_path_buf(),
            message: message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_defaults() {
        let repo = MockRepository::default();
        assert_eq!(repo.current_branch().unwrap(), "feature");
        assert!(!repo.is_dirty().unwrap());
        assert!(repo.has_changed(Path::new("VERSION")).unwrap());
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_mock_repository_records_commits() {
        let repo = MockRepository::new("develop");
        repo.commit(Path::new("/repo/VERSION"), "release: v1.0.1").unwrap();
        repo.commit(Path::new("/repo/VERSION"), "release: v1.0.2").unwrap();

        let commits = repo.commits();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "release: v1.0.1");
        assert_eq!(commits[1].path, PathBuf::from("/repo/VERSION"));
    }

    #[test]
    fn test_mock_repository_injected_failures() {
        let repo = MockRepository::new("develop")
            .with_branch_error("no HEAD")
            .with_status_error("index locked")
            .with_commit_error("hook rejected");

        assert!(matches!(
            repo.current_branch(),
            Err(BumpError::RepositoryQuery(_))
        ));
        assert!(matches!(
            repo.is_dirty(),
            Err(BumpError::RepositoryQuery(_))
        ));
        assert!(matches!(
            repo.commit(Path::new("VERSION"), "release: v1.0.0"),
            Err(BumpError::Commit(_))
        ));
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_mock_repository_flags() {
        let repo = MockRepository::new("develop")
            .with_dirty_tree()
            .without_changes();
        assert!(repo.is_dirty().unwrap());
        assert!(!repo.has_changed(Path::new("VERSION")).unwrap());
    }
}
