use std::{env, io, path::PathBuf};

// Repository path the commit trigger operates on when no override is set
const DEFAULT_PROJECT_ROOT: &str = "/vercel/share/v0-project";

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_root: PathBuf,
}

impl ProjectConfig {
    /// Configuration for the commit trigger: the fixed repository path,
    /// overridable via `PROJECT_ROOT`.
    pub fn from_env() -> Self {
        let project_root = env::var("PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROJECT_ROOT));

        Self { project_root }
    }

    /// Configuration for the companion commands, which operate wherever they
    /// are invoked, like the scripts they replace. `PROJECT_ROOT` still wins
    /// when set.
    pub fn from_current_dir() -> io::Result<Self> {
        if let Ok(root) = env::var("PROJECT_ROOT") {
            return Ok(Self {
                project_root: PathBuf::from(root),
            });
        }

        Ok(Self {
            project_root: env::current_dir()?,
        })
    }
}
