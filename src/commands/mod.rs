//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod clean;
pub mod report;
pub mod run;
pub mod split;

// Re-export main command functions
pub use clean::execute_clean;
pub use report::{execute_report, ReportArgs};
pub use run::execute_run;
pub use split::execute_split;
