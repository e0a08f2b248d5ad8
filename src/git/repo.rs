//! Repository pre-flight: locate git and the enclosing work tree.

use std::path::Path;

use git2::Repository;
use tracing::debug;

use crate::config::Settings;
use crate::error::GitError;

use super::executor::GitCli;

/// Verify the git executable exists and `start` lies inside a work tree.
///
/// Returns a [`GitCli`] rooted at the work tree that resolves user-supplied
/// paths against `start`. Bare repositories count as "not a repository"
/// since there is nothing to stage.
pub fn open_repository(settings: &Settings, start: &Path) -> Result<GitCli, GitError> {
    let git = which::which(&settings.git_binary)
        .map_err(|_| GitError::NotInstalled(settings.git_binary.clone()))?;

    let repo = Repository::discover(start).map_err(GitError::NotARepository)?;
    let workdir = repo.workdir().ok_or_else(|| {
        GitError::NotARepository(git2::Error::from_str("bare repository has no work tree"))
    })?;

    debug!("Using git at {} in {}", git.display(), workdir.display());
    Ok(GitCli::new(git, workdir).with_invocation_dir(start))
}
