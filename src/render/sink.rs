use std::process::Command;
use crate::errors::ReportError;
use crate::models::ChartArtifact;
use tracing::debug;

/// Receives each chart after it has been written to disk.
pub trait DisplaySink: Send + Sync {
    fn name(&self) -> &'static str;

    fn show(&self, artifact: &ChartArtifact) -> Result<(), ReportError>;
}

/// Shows nothing. The default for batch runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl DisplaySink for Headless {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn show(&self, _artifact: &ChartArtifact) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Opens each chart in the platform's default image viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &std::path::Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl DisplaySink for SystemViewer {
    fn name(&self) -> &'static str {
        "system-viewer"
    }

    fn show(&self, artifact: &ChartArtifact) -> Result<(), ReportError> {
        debug!(path = %artifact.path.display(), "Opening chart in system viewer");
        Self::command(&artifact.path)
            .spawn()
            .map(|_| ())
            .map_err(|e| ReportError::Display(format!(
                "could not open {}: {}",
                artifact.path.display(),
                e
            )))
    }
}
