pub mod exec;
pub mod logging;

pub use exec::{CommandOutput, ExecError, resolve_executable, run_captured};
pub use logging::init_tracing;
