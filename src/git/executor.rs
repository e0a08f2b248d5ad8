//! The version-control collaborator: every git query and mutation raven issues.
//!
//! All operations use `std::process::Command` to shell out to the system `git`
//! binary synchronously, inheriting the user's existing git config, hooks, and
//! credential setup. Calls block until git exits; there is no timeout.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::GitError;

use super::history::CommitCountHistogram;
use super::status::{WorkingTreeSnapshot, parse_status};

/// Trait for the git operations the workflows depend on.
///
/// This abstraction allows mocking the git subprocess in tests. Mutations
/// return git's raw diagnostic text on success; callers never parse it.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Branch descriptor and changed files.
    fn status(&self) -> Result<WorkingTreeSnapshot, GitError>;

    /// Unified diff of the index against HEAD. Empty means nothing staged.
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Commits per author date across the current branch history.
    fn commit_counts(&self) -> Result<CommitCountHistogram, GitError>;

    /// Full message of the HEAD commit, trimmed.
    fn last_commit_message(&self) -> Result<String, GitError>;

    fn stage(&self, path: &str) -> Result<String, GitError>;

    /// Drop `path` from the index. Unlike [`Vcs::stage`], which takes paths
    /// as status reports them, `path` here is typed by the user and resolves
    /// against the directory raven was started in.
    fn unstage(&self, path: &str) -> Result<String, GitError>;

    fn commit(&self, message: &str, amend: bool) -> Result<String, GitError>;

    /// Fold the index into HEAD keeping its message.
    fn amend_no_edit(&self) -> Result<String, GitError>;

    /// Undo HEAD, keeping its changes staged.
    fn reset_last_commit_soft(&self) -> Result<String, GitError>;
}

/// [`Vcs`] backed by the git command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    git: PathBuf,
    workdir: PathBuf,
    /// Directory user-supplied pathspecs are relative to.
    invoked_from: PathBuf,
}

impl GitCli {
    pub fn new(git: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        Self {
            git: git.into(),
            invoked_from: workdir.clone(),
            workdir,
        }
    }

    /// Resolve user-supplied paths against `dir` instead of the work tree root.
    pub fn with_invocation_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invoked_from = dir.into();
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, args: &[&str], operation: &str) -> Result<Output, GitError> {
        self.run_in(&self.workdir, args, operation)
    }

    fn run_in(&self, dir: &Path, args: &[&str], operation: &str) -> Result<Output, GitError> {
        debug!("git -C {} {}", dir.display(), args.join(" "));
        Command::new(&self.git)
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })
    }

    /// Run a read-only git command and return its stdout.
    fn query(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        let output = self.run(args, operation)?;
        if !output.status.success() {
            return Err(GitError::QueryFailed {
                operation: operation.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a state-changing git command and return its combined output.
    fn mutate(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        self.mutate_in(&self.workdir, args, operation)
    }

    fn mutate_in(&self, dir: &Path, args: &[&str], operation: &str) -> Result<String, GitError> {
        let output = self.run_in(dir, args, operation)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            // git commit reports "nothing to commit" on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(GitError::MutationFailed {
                operation: operation.to_string(),
                stderr: detail.to_string(),
            });
        }

        let combined = format!("{}\n{}", stdout.trim(), stderr.trim());
        Ok(combined.trim().to_string())
    }
}

impl Vcs for GitCli {
    fn status(&self) -> Result<WorkingTreeSnapshot, GitError> {
        let stdout = self.query(&["status", "-sb", "--porcelain"], "status")?;
        parse_status(&stdout)
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        self.query(&["diff", "--cached"], "diff --cached")
    }

    fn commit_counts(&self) -> Result<CommitCountHistogram, GitError> {
        let output = self.run(&["log", "--pretty=format:%ad", "--date=short"], "log")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // An unborn branch has no history yet
            if stderr.contains("does not have any commits yet") {
                return Ok(CommitCountHistogram::default());
            }
            return Err(GitError::QueryFailed {
                operation: "log".to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(CommitCountHistogram::from_log_output(
            &String::from_utf8_lossy(&output.stdout),
        ))
    }

    fn last_commit_message(&self) -> Result<String, GitError> {
        let stdout = self.query(&["log", "-1", "--pretty=%B"], "log -1")?;
        Ok(stdout.trim().to_string())
    }

    fn stage(&self, path: &str) -> Result<String, GitError> {
        self.mutate(&["add", "--", path], "add")
    }

    fn unstage(&self, path: &str) -> Result<String, GitError> {
        self.mutate_in(
            &self.invoked_from,
            &["restore", "--staged", "--", path],
            "restore --staged",
        )
    }

    fn commit(&self, message: &str, amend: bool) -> Result<String, GitError> {
        let mut args = vec!["commit", "-m", message];
        if amend {
            args.push("--amend");
        }
        self.mutate(&args, if amend { "commit --amend" } else { "commit" })
    }

    fn amend_no_edit(&self) -> Result<String, GitError> {
        self.mutate(&["commit", "--amend", "--no-edit"], "commit --amend")
    }

    fn reset_last_commit_soft(&self) -> Result<String, GitError> {
        self.mutate(&["reset", "--soft", "HEAD~1"], "reset --soft")
    }
}
