//! Clears the `node_modules` path in whatever form it exists so the next
//! package install starts from a clean slate.

use services::{
    config::ProjectConfig,
    services::doctor::{PurgeOutcome, WorkspaceDoctor},
};
use utils::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ProjectConfig::from_current_dir()?;
    println!("Project root: {}", config.project_root.display());

    let doctor = WorkspaceDoctor::new(&config.project_root);
    println!(
        "Checking node_modules at: {}",
        doctor.node_modules_path().display()
    );

    match doctor.purge_node_modules()? {
        PurgeOutcome::NothingToRemove => println!("node_modules does not exist - nothing to fix"),
        PurgeOutcome::RemovedFile => println!("node_modules was a regular file - removed it"),
        PurgeOutcome::RemovedSymlink => println!("node_modules was a symlink - removed it"),
        PurgeOutcome::RemovedDirectory => {
            println!("node_modules was a directory - removed it for a clean install")
        }
    }

    if doctor.lockfile_present() {
        println!("pnpm-lock.yaml exists");
    } else {
        println!("pnpm-lock.yaml does NOT exist");
    }

    println!("Done! node_modules path is clear for the next install.");
    Ok(())
}
