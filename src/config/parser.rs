use std::path::Path;
use crate::errors::ReportError;
use super::types::{ReportConfig, RunSettings};

const MAX_CONFIG_BYTES: u64 = 1_048_576;
const MIN_DIMENSION: u32 = 100;
const MAX_DIMENSION: u32 = 8192;

pub async fn parse_config(path: &Path) -> Result<ReportConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_config_str(&content)?;

    validate_settings(&config.resolve())?;

    Ok(config)
}

pub fn parse_config_str(content: &str) -> Result<ReportConfig, ReportError> {
    // An empty document parses as YAML null, not as an empty mapping
    if content.trim().is_empty() {
        return Ok(ReportConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Reject settings no run could succeed with.
pub fn validate_settings(settings: &RunSettings) -> Result<(), ReportError> {
    for (name, value) in [("width", settings.width), ("height", settings.height)] {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
            return Err(ReportError::Config(format!(
                "output.{} must be between {} and {}, got {}",
                name, MIN_DIMENSION, MAX_DIMENSION, value
            )));
        }
    }

    if settings.db_path.trim().is_empty() {
        return Err(ReportError::Config("store.path must not be empty".into()));
    }

    if settings.output_dir.as_os_str().is_empty() {
        return Err(ReportError::Config("output.directory must not be empty".into()));
    }

    Ok(())
}
