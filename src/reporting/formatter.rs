use console::style;
use crate::pipeline::state::{ReportOutcome, ReportStatus, RunSummary};
use crate::utils::formatting::{format_bytes, format_duration};

/// One line per report: a check or cross, the file name, and either the
/// written size or the failure reason.
pub fn format_outcome_line(outcome: &ReportOutcome) -> String {
    match &outcome.status {
        ReportStatus::Produced { path, bytes } => format!(
            "  {} {} {} ({}, {})",
            style("✓").green(),
            style(&outcome.file_name).green(),
            style(path.display()).dim(),
            format_bytes(*bytes),
            format_duration(outcome.duration_ms),
        ),
        ReportStatus::Failed { error_type, message } => format!(
            "  {} {} [{}] {}",
            style("✗").red(),
            style(&outcome.file_name).red(),
            style(error_type).red().bold(),
            style(message).dim(),
        ),
    }
}

pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {} records, {} reports\n",
        style("Report run").bold(),
        summary.dataset_size,
        summary.outcomes.len(),
    ));
    for outcome in &summary.outcomes {
        out.push_str(&format_outcome_line(outcome));
        out.push('\n');
    }

    let totals = format!(
        "{} produced, {} failed in {}",
        summary.produced_count(),
        summary.failed_count(),
        format_duration(summary.duration_ms),
    );
    if summary.all_succeeded() {
        out.push_str(&format!("\n{} {}\n", style("✓ Done:").green().bold(), totals));
    } else {
        out.push_str(&format!("\n{} {}\n", style("✗ Incomplete:").red().bold(), totals));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn summary() -> RunSummary {
        RunSummary {
            started_at: Utc::now(),
            duration_ms: 1500,
            dataset_size: 5,
            outcomes: vec![
                ReportOutcome {
                    name: "top_brands".into(),
                    file_name: "top_brands.png".into(),
                    duration_ms: 40,
                    status: ReportStatus::Produced { path: PathBuf::from("out/top_brands.png"), bytes: 2048 },
                },
                ReportOutcome {
                    name: "label_count".into(),
                    file_name: "label_count.png".into(),
                    duration_ms: 3,
                    status: ReportStatus::Failed {
                        error_type: "EmptyView".into(),
                        message: "Empty view: 'label_count' has no groups to draw".into(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_summary_lists_every_artifact() {
        console::set_colors_enabled(false);
        let text = format_run_summary(&summary());
        assert!(text.contains("top_brands.png"));
        assert!(text.contains("2.0 KiB"));
        assert!(text.contains("label_count.png"));
        assert!(text.contains("[EmptyView]"));
        assert!(text.contains("1 produced, 1 failed in 1.5s"));
        assert!(text.contains("Incomplete"));
    }
}
