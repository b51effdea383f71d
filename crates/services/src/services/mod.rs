pub mod commit;
pub mod doctor;
pub mod hygiene;

pub use commit::{CommitError, CommitService};
pub use doctor::{NodeModulesState, WorkspaceDoctor};
pub use hygiene::{HygieneError, IndexHygiene};
