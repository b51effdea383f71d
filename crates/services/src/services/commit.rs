use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use utils::exec::{self, CommandOutput, ExecError};

const GIT_EXECUTABLE: &str = "git";
const COMMIT_MESSAGE: &str = "Empty commit";

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("git executable not found on PATH")]
    GitNotFound,
    #[error("repository path does not exist: {0}")]
    RepoPathMissing(String),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Records empty commits in a repository to nudge downstream automation
/// (deploy hooks, CI re-runs) without changing any files.
pub struct CommitService {
    repo_path: PathBuf,
}

impl CommitService {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Run `git commit --allow-empty` in the repository and hand back the
    /// completed child run.
    ///
    /// A run is returned whether or not git accepted the commit; callers read
    /// the exit status. Errors are reserved for the invocation machinery
    /// itself: missing repository path, missing git binary, spawn failure.
    pub async fn trigger_empty_commit(&self) -> Result<CommandOutput, CommitError> {
        if !self.repo_path.exists() {
            return Err(CommitError::RepoPathMissing(
                self.repo_path.display().to_string(),
            ));
        }

        let git = exec::resolve_executable(GIT_EXECUTABLE)
            .await
            .ok_or(CommitError::GitNotFound)?;

        debug!(repo_path = %self.repo_path.display(), "creating empty commit");
        let output = exec::run_captured(
            &git,
            ["commit", "--allow-empty", "-m", COMMIT_MESSAGE],
            &self.repo_path,
        )
        .await?;

        debug!(exit_code = output.exit_code(), "git commit finished");
        Ok(output)
    }
}
