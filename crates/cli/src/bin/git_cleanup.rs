//! Clears a stray `node_modules` out of the working tree and the git index,
//! then stages `.gitignore` so it stays gone.

use services::{
    config::ProjectConfig,
    services::{doctor::WorkspaceDoctor, hygiene::IndexHygiene},
};
use tracing::{info, warn};
use utils::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("starting git cleanup");

    let config = ProjectConfig::from_current_dir()?;
    let doctor = WorkspaceDoctor::new(&config.project_root);

    match doctor.remove_if_file() {
        Ok(true) => info!("node_modules was a regular file, removed it"),
        Ok(false) => info!("node_modules is not a regular file, nothing to remove"),
        Err(err) => warn!("could not repair node_modules: {err}"),
    }

    // Partial failure is expected here (path not tracked, no .gitignore yet);
    // each step reports and the cleanup carries on, like the script it
    // replaces.
    let hygiene = IndexHygiene::new(&config.project_root);

    info!("removing node_modules from the git index");
    match hygiene.untrack_node_modules().await {
        Ok(true) => info!("removed node_modules from the index"),
        Ok(false) => info!("node_modules was not tracked"),
        Err(err) => warn!("git rm failed: {err}"),
    }

    info!("staging .gitignore");
    match hygiene.stage_gitignore().await {
        Ok(()) => info!("git index updated"),
        Err(err) => warn!("git add failed: {err}"),
    }

    info!("cleanup complete");
    Ok(())
}
