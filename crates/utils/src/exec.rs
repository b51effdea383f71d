//! One-shot child process execution with captured output.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result of running a child process to completion.
///
/// Captured streams are decoded lossily; invalid UTF-8 never fails a run.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code of the child. A signal-terminated child reports no code
    /// and is mapped to 1.
    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(1)
    }
}

/// Run `program` with `args` in `cwd`, wait for it to exit, and capture
/// both output streams.
///
/// Stdin is closed so the child cannot hang waiting for input. The handle is
/// spawned with kill-on-drop; a child never outlives an aborted run.
pub async fn run_captured<I, S>(
    program: impl AsRef<OsStr>,
    args: I,
    cwd: &Path,
) -> Result<CommandOutput, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program_name = program.as_ref().to_string_lossy().into_owned();

    let mut command = Command::new(program.as_ref());
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command.spawn().map_err(|source| ExecError::Launch {
        program: program_name.clone(),
        source,
    })?;

    let output = child
        .wait_with_output()
        .await
        .map_err(|source| ExecError::Wait {
            program: program_name,
            source,
        })?;

    Ok(CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Resolve an executable by name.
///
/// Explicit absolute paths are accepted as-is; anything else goes through a
/// PATH lookup on a blocking task.
pub async fn resolve_executable(executable: &str) -> Option<PathBuf> {
    if executable.trim().is_empty() {
        return None;
    }

    let path = Path::new(executable);
    if path.is_absolute() && path.is_file() {
        return Some(path.to_path_buf());
    }

    let executable = executable.to_string();
    tokio::task::spawn_blocking(move || which::which(executable))
        .await
        .ok()
        .and_then(|result| result.ok())
}
