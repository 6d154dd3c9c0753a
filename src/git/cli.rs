use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{BumpError, Result};

/// [Repository](super::Repository) backed by the external `git` command
///
/// Every call runs `git` with `workdir` as its working directory, so the
/// repository is whatever `git` discovers from there.
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Create a handle that runs `git` inside `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            workdir: workdir.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir);
        cmd
    }

    /// Run a query command and return its output, failing on spawn errors.
    fn query(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, workdir = %self.workdir.display(), "running git");

        self.command().args(args).output().map_err(|e| {
            BumpError::repository_query(format!("failed to run git {}: {}", args.join(" "), e))
        })
    }

    /// Run a query command that must exit successfully and return its stdout.
    fn query_stdout(&self, args: &[&str]) -> Result<String> {
        let output = self.query(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpError::repository_query(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl super::Repository for GitCli {
    fn current_branch(&self) -> Result<String> {
        let stdout = self.query_stdout(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }

    fn is_dirty(&self) -> Result<bool> {
        let stdout = self.query_stdout(&["status", "--porcelain"])?;
        Ok(!stdout.trim().is_empty())
    }

    fn has_changed(&self, path: &Path) -> Result<bool> {
        let path_arg = path.to_string_lossy();
        let args = ["diff", "--quiet", "--exit-code", "--", &*path_arg];
        let output = self.query(&args)?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(BumpError::repository_query(format!(
                    "git diff failed for {}: {}",
                    path.display(),
                    stderr.trim()
                )))
            }
        }
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        debug!(path = %path.display(), commit_message = message, "running git commit");

        // stdout and stderr are inherited so git's own report reaches the user
        let status = self
            .command()
            .arg("commit")
            .arg("-m")
            .arg(message)
            .arg("--")
            .arg(path)
            .status()
            .map_err(|e| BumpError::commit(format!("failed to run git commit: {}", e)))?;

        if !status.success() {
            return Err(BumpError::commit(match status.code() {
                Some(code) => format!("git commit exited with status {}", code),
                None => "git commit was terminated by a signal".to_string(),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        let found = Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !found {
            eprintln!("skipping: git executable not found on PATH");
        }
        found
    }

    fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn setup_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init", "--quiet"]);
        git(dir.path(), &["config", "user.name", "Test User"]);
        git(dir.path(), &["config", "user.email", "test@example.com"]);
        git(dir.path(), &["config", "commit.gpgsign", "false"]);
        fs::write(dir.path().join("VERSION"), "1.2.3").unwrap();
        git(dir.path(), &["add", "VERSION"]);
        git(dir.path(), &["commit", "--quiet", "-m", "initial"]);
        git(dir.path(), &["checkout", "--quiet", "-b", "feature"]);
        dir
    }

    #[test]
    fn test_current_branch() {
        if !git_available() {
            return;
        }
        let dir = setup_repo();
        let repo = GitCli::new(dir.path());
        assert_eq!(repo.current_branch().unwrap(), "feature");
    }

    #[test]
    fn test_current_branch_outside_repository_fails() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let repo = GitCli::new(dir.path().join("missing"));
        assert!(matches!(
            repo.current_branch(),
            Err(BumpError::RepositoryQuery(_))
        ));
    }

    #[test]
    fn test_is_dirty_tracks_untracked_and_modified() {
        if !git_available() {
            return;
        }
        let dir = setup_repo();
        let repo = GitCli::new(dir.path());
        assert!(!repo.is_dirty().unwrap());

        fs::write(dir.path().join("notes.txt"), "scratch").unwrap();
        assert!(repo.is_dirty().unwrap());

        fs::remove_file(dir.path().join("notes.txt")).unwrap();
        fs::write(dir.path().join("VERSION"), "9.9.9").unwrap();
        assert!(repo.is_dirty().unwrap());
    }

    #[test]
    fn test_has_changed_and_commit() {
        if !git_available() {
            return;
        }
        let dir = setup_repo();
        let repo = GitCli::new(dir.path());
        let version_file = dir.path().join("VERSION");

        assert!(!repo.has_changed(&version_file).unwrap());

        fs::write(&version_file, "1.2.4").unwrap();
        assert!(repo.has_changed(&version_file).unwrap());

        repo.commit(&version_file, "release: v1.2.4").unwrap();
        assert!(!repo.has_changed(&version_file).unwrap());
        assert!(!repo.is_dirty().unwrap());

        let log = Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&log.stdout).trim(),
            "release: v1.2.4"
        );
    }

    #[test]
    fn test_commit_without_changes_fails() {
        if !git_available() {
            return;
        }
        let dir = setup_repo();
        let repo = GitCli::new(dir.path());
        let result = repo.commit(&dir.path().join("VERSION"), "release: v1.2.3");
        assert!(matches!(result, Err(BumpError::Commit(_))));
    }
}
