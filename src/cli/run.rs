use std::path::{Path, PathBuf};
use std::sync::Arc;
use crate::cli::commands::RunArgs;
use crate::config::{self, ReportConfig, RunSettings};
use crate::errors::ReportError;
use crate::pipeline::{self, RunSummary};
use crate::render::{DisplaySink, Headless, SystemViewer};
use crate::reporting::format_run_summary;
use tracing::info;

/// Merge config file values with command-line overrides.
pub async fn resolve_settings(args: &RunArgs) -> Result<RunSettings, ReportError> {
    let config = match &args.config {
        Some(path) => config::parse_config(Path::new(path)).await?,
        None => ReportConfig::default(),
    };

    let mut settings = config.resolve();
    if let Some(output) = &args.output {
        settings.output_dir = PathBuf::from(output);
    }
    if let Some(db) = &args.db {
        settings.db_path = db.clone();
    }
    if args.show {
        settings.show = true;
    }
    if args.sequential {
        settings.parallel = false;
    }

    config::validate_settings(&settings)?;
    Ok(settings)
}

pub async fn handle_run(args: RunArgs) -> Result<RunSummary, ReportError> {
    let settings = resolve_settings(&args).await?;
    info!(parallel = settings.parallel, show = settings.show, "Settings resolved");

    let sink: Arc<dyn DisplaySink> = if settings.show {
        Arc::new(SystemViewer)
    } else {
        Arc::new(Headless)
    };

    let summary = pipeline::run(&settings, sink).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_run_summary(&summary));
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.yaml");
        std::fs::write(&path, "output:\n  directory: from-file\nstore:\n  path: file.db\n").unwrap();

        let args = RunArgs {
            config: Some(path.to_string_lossy().to_string()),
            output: Some("from-flag".into()),
            sequential: true,
            ..Default::default()
        };
        let settings = resolve_settings(&args).await.unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("from-flag"));
        assert_eq!(settings.db_path, "file.db");
        assert!(!settings.parallel);
    }

    #[tokio::test]
    async fn test_no_config_uses_defaults() {
        let settings = resolve_settings(&RunArgs::default()).await.unwrap();
        assert_eq!(settings, RunSettings::default());
    }

    #[tokio::test]
    async fn test_empty_db_flag_is_config_error() {
        let args = RunArgs { db: Some(String::new()), ..Default::default() };
        let err = resolve_settings(&args).await.unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }
}
