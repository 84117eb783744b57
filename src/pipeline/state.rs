use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// What happened to one report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReportStatus {
    Produced {
        path: PathBuf,
        bytes: u64,
    },
    Failed {
        error_type: String,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub name: String,
    pub file_name: String,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub status: ReportStatus,
}

impl ReportOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, ReportStatus::Produced { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub dataset_size: usize,
    pub outcomes: Vec<ReportOutcome>,
}

impl RunSummary {
    pub fn produced_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.produced_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, status: ReportStatus) -> ReportOutcome {
        ReportOutcome {
            name: name.to_string(),
            file_name: format!("{}.png", name),
            duration_ms: 5,
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            started_at: Utc::now(),
            duration_ms: 10,
            dataset_size: 5,
            outcomes: vec![
                outcome("a", ReportStatus::Produced { path: PathBuf::from("a.png"), bytes: 10 }),
                outcome("b", ReportStatus::Failed { error_type: "EmptyView".into(), message: "no groups".into() }),
            ],
        };
        assert_eq!(summary.produced_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_outcome_serializes_flat_status() {
        let json = serde_json::to_value(outcome(
            "top_brands",
            ReportStatus::Failed { error_type: "IOError".into(), message: "denied".into() },
        ))
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error_type"], "IOError");
        assert_eq!(json["file_name"], "top_brands.png");
    }
}
