//! Git index hygiene.
//!
//! Companion to the workspace doctor: once a stray `node_modules` has made it
//! into the index (or a commit), installs keep resurrecting it. These
//! operations query and repair the index through the git CLI.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use utils::exec::{self, CommandOutput, ExecError};

const GIT_EXECUTABLE: &str = "git";
const NODE_MODULES: &str = "node_modules";
const GITIGNORE: &str = ".gitignore";

#[derive(Debug, Error)]
pub enum HygieneError {
    #[error("git executable not found on PATH")]
    GitNotFound,
    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
    #[error(transparent)]
    Exec(#[from] ExecError),
}

pub struct IndexHygiene {
    repo_path: PathBuf,
}

impl IndexHygiene {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    async fn git(&self, args: &[&str]) -> Result<CommandOutput, HygieneError> {
        let git = exec::resolve_executable(GIT_EXECUTABLE)
            .await
            .ok_or(HygieneError::GitNotFound)?;

        debug!(repo_path = %self.repo_path.display(), ?args, "running git");
        Ok(exec::run_captured(&git, args, &self.repo_path).await?)
    }

    /// Index paths under `node_modules`, one per tracked file. Empty when
    /// nothing is tracked.
    pub async fn tracked_node_modules(&self) -> Result<Vec<String>, HygieneError> {
        let output = self.git(&["ls-files", NODE_MODULES]).await?;
        if !output.success() {
            return Err(HygieneError::CommandFailed {
                command: format!("ls-files {NODE_MODULES}"),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output
            .stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// The `node_modules` entry in the committed tree, if any. A repository
    /// without commits has no tree and reports `None`.
    pub async fn head_tree_entry(&self) -> Result<Option<String>, HygieneError> {
        let output = self.git(&["ls-tree", "HEAD", NODE_MODULES]).await?;
        if !output.success() {
            // no HEAD yet
            return Ok(None);
        }

        let entry = output.stdout.trim();
        if entry.is_empty() {
            Ok(None)
        } else {
            Ok(Some(entry.to_string()))
        }
    }

    /// Drop `node_modules` from the index, keeping the working tree intact.
    ///
    /// Returns whether anything was removed; git refusing because the path is
    /// not tracked is the expected negative, not an error.
    pub async fn untrack_node_modules(&self) -> Result<bool, HygieneError> {
        let output = self.git(&["rm", "--cached", "-r", NODE_MODULES]).await?;
        Ok(output.success())
    }

    /// Stage `.gitignore` so the freshly untracked path stays out of the
    /// next commit.
    pub async fn stage_gitignore(&self) -> Result<(), HygieneError> {
        let output = self.git(&["add", GITIGNORE]).await?;
        if !output.success() {
            return Err(HygieneError::CommandFailed {
                command: format!("add {GITIGNORE}"),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
