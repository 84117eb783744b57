pub mod formatter;

pub use formatter::{format_outcome_line, format_run_summary};
