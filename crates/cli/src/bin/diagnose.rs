//! Read-mostly workspace diagnostic: reports what the `node_modules` path
//! actually is, repairs the file-shaped case, and lists the packaging
//! entries at the workspace root.

use services::{
    config::ProjectConfig,
    services::doctor::{NodeModulesState, WorkspaceDoctor},
};
use utils::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ProjectConfig::from_current_dir()?;
    println!("Workspace: {}", config.project_root.display());

    let doctor = WorkspaceDoctor::new(&config.project_root);

    match doctor.inspect_node_modules()? {
        NodeModulesState::Missing => {
            println!(
                "node_modules does not exist at {}",
                doctor.node_modules_path().display()
            );
        }
        state @ NodeModulesState::File { .. } => {
            println!("node_modules is a {state}, not a directory - removing it");
            doctor.remove_if_file()?;
            println!("Removed node_modules file");
        }
        state => println!("node_modules is a {state}"),
    }

    let report = doctor.scan_top_level()?;
    println!();
    println!("Top-level entries: {}", report.total_entries);
    if report.flagged.is_empty() {
        println!("No packaging entries flagged");
    } else {
        println!("Flagged: {}", report.flagged.join(", "));
    }

    Ok(())
}
