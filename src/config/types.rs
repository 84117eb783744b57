use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const DEFAULT_DB_PATH: &str = "./cosmetics_data.db";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// On-disk configuration. Every section and key is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub output: Option<OutputConfig>,
    pub store: Option<StoreConfig>,
    pub pipeline: Option<PipelineConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub write_summary: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// SQLite file, or `:memory:`.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub show: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSettings {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub write_summary: bool,
    pub db_path: String,
    pub parallel: bool,
    pub show: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            write_summary: true,
            db_path: DEFAULT_DB_PATH.to_string(),
            parallel: true,
            show: false,
        }
    }
}

impl ReportConfig {
    /// Fill unset keys with defaults.
    pub fn resolve(&self) -> RunSettings {
        let defaults = RunSettings::default();
        let output = self.output.clone().unwrap_or_default();
        let store = self.store.clone().unwrap_or_default();
        let pipeline = self.pipeline.clone().unwrap_or_default();
        let display = self.display.clone().unwrap_or_default();

        RunSettings {
            output_dir: output.directory.map(PathBuf::from).unwrap_or(defaults.output_dir),
            width: output.width.unwrap_or(defaults.width),
            height: output.height.unwrap_or(defaults.height),
            write_summary: output.write_summary.unwrap_or(defaults.write_summary),
            db_path: store.path.unwrap_or(defaults.db_path),
            parallel: pipeline.parallel.unwrap_or(defaults.parallel),
            show: display.show.unwrap_or(defaults.show),
        }
    }
}

impl RunSettings {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
