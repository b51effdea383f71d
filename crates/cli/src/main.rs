//! Records an empty commit in the project repository so downstream
//! automation re-runs without any file changes.

use std::process::ExitCode;

use services::{config::ProjectConfig, services::commit::CommitService};
use utils::init_tracing;

const SUCCESS_MESSAGE: &str = "Empty commit created successfully";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = ProjectConfig::from_env();
    let service = CommitService::new(config.project_root);

    match service.trigger_empty_commit().await {
        Ok(output) => {
            // relay the child's streams before deciding the outcome
            print!("{}", output.stdout);
            if !output.stderr.is_empty() {
                eprint!("{}", output.stderr);
            }

            if output.success() {
                println!("{SUCCESS_MESSAGE}");
                ExitCode::SUCCESS
            } else {
                ExitCode::from(clamp_exit_code(output.exit_code()))
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

// Mirror the child's exit code; anything unrepresentable becomes a plain 1.
fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
