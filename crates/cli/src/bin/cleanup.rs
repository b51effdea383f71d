//! Full workspace report and repair: classifies `node_modules` on disk,
//! removes it when it is a stray file, and reconciles the git index view.

use services::{
    config::ProjectConfig,
    services::{
        doctor::{NodeModulesState, WorkspaceDoctor},
        hygiene::IndexHygiene,
    },
};
use tracing::warn;
use utils::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ProjectConfig::from_current_dir()?;
    println!("Project root: {}", config.project_root.display());

    let doctor = WorkspaceDoctor::new(&config.project_root);
    println!(
        "Checking node_modules at: {}",
        doctor.node_modules_path().display()
    );

    match doctor.inspect_node_modules() {
        Ok(state @ NodeModulesState::File { .. }) => {
            println!("node_modules is a {state} - removing it");
            match doctor.remove_if_file() {
                Ok(_) => println!("Deleted node_modules file"),
                Err(err) => warn!("could not delete node_modules: {err}"),
            }
        }
        Ok(NodeModulesState::Missing) => println!("node_modules does not exist at this path"),
        Ok(state) => println!("node_modules is a {state}"),
        Err(err) => warn!("could not inspect node_modules: {err}"),
    }

    let hygiene = IndexHygiene::new(&config.project_root);

    match hygiene.tracked_node_modules().await {
        Ok(tracked) if tracked.is_empty() => println!("node_modules is not tracked by git"),
        Ok(tracked) => {
            println!("node_modules is tracked by git:");
            for path in &tracked {
                println!("  {path}");
            }
            println!("Removing from git tracking...");
            match hygiene.untrack_node_modules().await {
                Ok(true) => println!("Removed from git tracking"),
                Ok(false) => println!("git declined to remove the entries"),
                Err(err) => warn!("git rm failed: {err}"),
            }
        }
        Err(err) => warn!("git tracking check failed: {err}"),
    }

    match hygiene.head_tree_entry().await {
        Ok(Some(entry)) => println!("HEAD tree still lists node_modules: {entry}"),
        Ok(None) => println!("HEAD tree does not list node_modules"),
        Err(err) => warn!("git ls-tree failed: {err}"),
    }

    Ok(())
}
