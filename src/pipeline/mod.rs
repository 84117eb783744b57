pub mod aggregator;
pub mod orchestrator;
pub mod state;

pub use aggregator::aggregate;
pub use orchestrator::{execute_report, load_dataset, run, run_reports, RunOptions, SUMMARY_FILE};
pub use state::{ReportOutcome, ReportStatus, RunSummary};
