//! Workspace filesystem repair.
//!
//! Sandboxed package installs occasionally leave the `node_modules` path
//! behind as a regular file, which then blocks every subsequent install. The
//! doctor classifies what is actually on disk and clears the path.

use std::{fmt, fs, io, path::PathBuf};

use tracing::{debug, info};

const NODE_MODULES: &str = "node_modules";
const PNPM_LOCKFILE: &str = "pnpm-lock.yaml";

// Name prefixes worth surfacing when scanning the workspace root
const DIAGNOSTIC_PREFIXES: [&str; 4] = ["node", "pnpm", ".git", ".npm"];

/// What the `node_modules` path currently is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeModulesState {
    Missing,
    File { size: u64 },
    Directory,
    Symlink,
}

impl fmt::Display for NodeModulesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeModulesState::Missing => write!(f, "missing"),
            NodeModulesState::File { size } => write!(f, "regular file ({size} bytes)"),
            NodeModulesState::Directory => write!(f, "directory"),
            NodeModulesState::Symlink => write!(f, "symlink"),
        }
    }
}

/// What `purge_node_modules` actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    NothingToRemove,
    RemovedFile,
    RemovedSymlink,
    RemovedDirectory,
}

/// Snapshot of the workspace root directory listing.
#[derive(Debug)]
pub struct DirectoryReport {
    pub total_entries: usize,
    /// Entries matching the diagnostic shortlist, sorted.
    pub flagged: Vec<String>,
}

pub struct WorkspaceDoctor {
    workspace_root: PathBuf,
}

impl WorkspaceDoctor {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }

    pub fn node_modules_path(&self) -> PathBuf {
        self.workspace_root.join(NODE_MODULES)
    }

    /// Classify the `node_modules` path without following symlinks.
    pub fn inspect_node_modules(&self) -> io::Result<NodeModulesState> {
        let path = self.node_modules_path();
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(NodeModulesState::Missing);
            }
            Err(err) => return Err(err),
        };

        let file_type = metadata.file_type();
        let state = if file_type.is_symlink() {
            NodeModulesState::Symlink
        } else if file_type.is_dir() {
            NodeModulesState::Directory
        } else {
            NodeModulesState::File {
                size: metadata.len(),
            }
        };

        debug!(path = %path.display(), %state, "inspected node_modules");
        Ok(state)
    }

    /// Delete `node_modules` only when it is a regular file. A real directory
    /// is left untouched.
    pub fn remove_if_file(&self) -> io::Result<bool> {
        match self.inspect_node_modules()? {
            NodeModulesState::File { .. } => {
                fs::remove_file(self.node_modules_path())?;
                info!("removed node_modules file");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Remove `node_modules` in whatever form it exists, clearing the path
    /// for a clean package install.
    pub fn purge_node_modules(&self) -> io::Result<PurgeOutcome> {
        let path = self.node_modules_path();
        let outcome = match self.inspect_node_modules()? {
            NodeModulesState::Missing => PurgeOutcome::NothingToRemove,
            NodeModulesState::File { .. } => {
                fs::remove_file(&path)?;
                PurgeOutcome::RemovedFile
            }
            NodeModulesState::Symlink => {
                fs::remove_file(&path)?;
                PurgeOutcome::RemovedSymlink
            }
            NodeModulesState::Directory => {
                fs::remove_dir_all(&path)?;
                PurgeOutcome::RemovedDirectory
            }
        };

        debug!(path = %path.display(), ?outcome, "purged node_modules");
        Ok(outcome)
    }

    pub fn lockfile_present(&self) -> bool {
        self.workspace_root.join(PNPM_LOCKFILE).is_file()
    }

    /// Scan the workspace root, surfacing entries whose names start with one
    /// of the diagnostic prefixes.
    pub fn scan_top_level(&self) -> io::Result<DirectoryReport> {
        let mut total_entries = 0;
        let mut flagged = Vec::new();

        for entry in fs::read_dir(&self.workspace_root)? {
            let entry = entry?;
            total_entries += 1;

            let name = entry.file_name().to_string_lossy().into_owned();
            if DIAGNOSTIC_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix))
            {
                flagged.push(name);
            }
        }

        flagged.sort();
        Ok(DirectoryReport {
            total_entries,
            flagged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doctor_in(temp: &TempDir) -> WorkspaceDoctor {
        WorkspaceDoctor::new(temp.path())
    }

    #[test]
    fn missing_node_modules_is_reported_as_missing() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);

        assert_eq!(
            doctor.inspect_node_modules().unwrap(),
            NodeModulesState::Missing
        );
        assert!(!doctor.remove_if_file().unwrap());
        assert_eq!(
            doctor.purge_node_modules().unwrap(),
            PurgeOutcome::NothingToRemove
        );
    }

    #[test]
    fn file_shaped_node_modules_is_detected_and_removed() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);
        fs::write(doctor.node_modules_path(), "not a directory").unwrap();

        assert_eq!(
            doctor.inspect_node_modules().unwrap(),
            NodeModulesState::File { size: 15 }
        );
        assert!(doctor.remove_if_file().unwrap());
        assert_eq!(
            doctor.inspect_node_modules().unwrap(),
            NodeModulesState::Missing
        );
    }

    #[test]
    fn real_directory_survives_remove_if_file() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);
        fs::create_dir(doctor.node_modules_path()).unwrap();

        assert_eq!(
            doctor.inspect_node_modules().unwrap(),
            NodeModulesState::Directory
        );
        assert!(!doctor.remove_if_file().unwrap());
        assert!(doctor.node_modules_path().is_dir());
    }

    #[test]
    fn purge_removes_a_populated_directory() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);
        fs::create_dir(doctor.node_modules_path()).unwrap();
        fs::write(doctor.node_modules_path().join("left-pad.js"), "{}").unwrap();

        assert_eq!(
            doctor.purge_node_modules().unwrap(),
            PurgeOutcome::RemovedDirectory
        );
        assert_eq!(
            doctor.inspect_node_modules().unwrap(),
            NodeModulesState::Missing
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_node_modules_is_detected_and_purged() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);

        let target = temp.path().join("real_modules");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, doctor.node_modules_path()).unwrap();

        assert_eq!(
            doctor.inspect_node_modules().unwrap(),
            NodeModulesState::Symlink
        );
        assert_eq!(
            doctor.purge_node_modules().unwrap(),
            PurgeOutcome::RemovedSymlink
        );
        // the link target stays put
        assert!(target.is_dir());
    }

    #[test]
    fn scan_flags_packaging_entries_only() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);

        fs::create_dir(temp.path().join("node_modules")).unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("pnpm-lock.yaml"), "lockfileVersion: 9").unwrap();
        fs::write(temp.path().join(".npmrc"), "").unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let report = doctor.scan_top_level().unwrap();
        assert_eq!(report.total_entries, 5);
        assert_eq!(report.flagged, vec![".npmrc", "node_modules", "pnpm-lock.yaml"]);
    }

    #[test]
    fn lockfile_presence_is_reported() {
        let temp = TempDir::new().unwrap();
        let doctor = doctor_in(&temp);

        assert!(!doctor.lockfile_present());
        fs::write(temp.path().join("pnpm-lock.yaml"), "").unwrap();
        assert!(doctor.lockfile_present());
    }
}
