use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use chrono::Utc;
use futures::future::join_all;
use crate::config::RunSettings;
use crate::db::Database;
use crate::errors::ReportError;
use crate::models::{default_reports, sample_products, ChartArtifact, ProductRecord, ReportSpec};
use crate::render::{self, DisplaySink};
use super::aggregator::aggregate;
use super::state::{ReportOutcome, ReportStatus, RunSummary};
use tracing::{error, info, warn};

pub const SUMMARY_FILE: &str = "summary.json";

/// Where and how the reports of one run are drawn.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub size: (u32, u32),
    pub parallel: bool,
}

impl From<&RunSettings> for RunOptions {
    fn from(settings: &RunSettings) -> Self {
        Self {
            output_dir: settings.output_dir.clone(),
            size: settings.size(),
            parallel: settings.parallel,
        }
    }
}

/// Seed the store with the sample products and read them back as the run's dataset.
/// The handle is closed before returning, on success and on error.
pub fn load_dataset(db_path: &str) -> Result<Vec<ProductRecord>, ReportError> {
    let mut db = Database::open(db_path)?;
    let loaded = db.seed(&sample_products()).and_then(|_| db.load_products());
    db.close()?;
    loaded
}

/// Aggregate and draw a single report, then write it under `options.output_dir`.
pub fn execute_report(
    dataset: &[ProductRecord],
    spec: &ReportSpec,
    options: &RunOptions,
) -> Result<ChartArtifact, ReportError> {
    let view = aggregate(&spec.name, dataset, spec.group_field, spec.metric)?;
    let output_path = options.output_dir.join(&spec.file_name);
    render::render(&view, spec.kind, &spec.style, &output_path, options.size)
}

async fn run_one(
    dataset: Arc<Vec<ProductRecord>>,
    spec: ReportSpec,
    options: RunOptions,
    sink: Arc<dyn DisplaySink>,
) -> ReportOutcome {
    let started = Instant::now();
    let name = spec.name.clone();
    let file_name = spec.file_name.clone();

    let joined = tokio::task::spawn_blocking(move || {
        let result = execute_report(&dataset, &spec, &options);
        if let Ok(artifact) = &result {
            if let Err(e) = sink.show(artifact) {
                warn!(report = %spec.name, sink = sink.name(), error = %e, "Display failed");
            }
        }
        result
    })
    .await;

    let result = joined.unwrap_or_else(|e| {
        Err(ReportError::Internal(format!("report task did not complete: {}", e)))
    });

    let status = match result {
        Ok(artifact) => {
            info!(report = %name, path = %artifact.path.display(), bytes = artifact.bytes, "Chart written");
            ReportStatus::Produced {
                path: artifact.path,
                bytes: artifact.bytes,
            }
        }
        Err(e) => {
            let class = e.classify();
            error!(report = %name, error_type = class.error_type, scope = ?class.scope, error = %e, "Report failed");
            ReportStatus::Failed {
                error_type: class.error_type.to_string(),
                message: e.to_string(),
            }
        }
    };

    ReportOutcome {
        name,
        file_name,
        duration_ms: started.elapsed().as_millis() as u64,
        status,
    }
}

/// Run every report against `dataset`. A failing report is recorded and the
/// rest still run. Outcomes come back in the order of `reports`.
pub async fn run_reports(
    dataset: Arc<Vec<ProductRecord>>,
    reports: Vec<ReportSpec>,
    options: &RunOptions,
    sink: Arc<dyn DisplaySink>,
) -> RunSummary {
    let started_at = Utc::now();
    let started = Instant::now();
    let dataset_size = dataset.len();

    let outcomes = if options.parallel {
        let tasks = reports
            .into_iter()
            .map(|spec| run_one(dataset.clone(), spec, options.clone(), sink.clone()));
        join_all(tasks).await
    } else {
        let mut outcomes = Vec::with_capacity(reports.len());
        for spec in reports {
            outcomes.push(run_one(dataset.clone(), spec, options.clone(), sink.clone()).await);
        }
        outcomes
    };

    RunSummary {
        started_at,
        duration_ms: started.elapsed().as_millis() as u64,
        dataset_size,
        outcomes,
    }
}

async fn write_summary(path: &std::path::Path, summary: &RunSummary) -> Result<(), ReportError> {
    tokio::fs::write(path, serde_json::to_string_pretty(summary)?).await?;
    Ok(())
}

/// Full run: load the dataset, draw the report catalogue, and write `summary.json`.
pub async fn run(settings: &RunSettings, sink: Arc<dyn DisplaySink>) -> Result<RunSummary, ReportError> {
    info!(db = %settings.db_path, output = %settings.output_dir.display(), "Starting report run");

    let dataset = Arc::new(load_dataset(&settings.db_path)?);
    info!(records = dataset.len(), "Dataset loaded");

    // Reports surface the failure individually when the directory is unusable
    if let Err(e) = tokio::fs::create_dir_all(&settings.output_dir).await {
        warn!(output = %settings.output_dir.display(), error = %e, "Could not create output directory");
    }

    let summary = run_reports(dataset, default_reports(), &RunOptions::from(settings), sink).await;

    if settings.write_summary {
        let path = settings.output_dir.join(SUMMARY_FILE);
        match write_summary(&path, &summary).await {
            Ok(()) => info!(path = %path.display(), "Run summary written"),
            Err(e) => warn!(path = %path.display(), error = %e, "Could not write run summary"),
        }
    }

    info!(
        produced = summary.produced_count(),
        failed = summary.failed_count(),
        duration_ms = summary.duration_ms,
        "Report run finished"
    );
    Ok(summary)
}
