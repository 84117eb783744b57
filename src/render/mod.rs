pub mod bar;
pub mod pie;
pub mod sink;

use std::path::{Path, PathBuf};
use plotters::prelude::*;
use crate::errors::ReportError;
use crate::models::{AggregateView, ChartArtifact, ChartKind, ChartStyle};
use tracing::debug;

pub use sink::{DisplaySink, Headless, SystemViewer};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// A chart drawn into an RGB pixel buffer, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RenderedChart {
    pub fn encode_png(&self) -> Result<Vec<u8>, ReportError> {
        let image = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| ReportError::Render(format!(
                "pixel buffer for '{}' does not match {}x{}",
                self.name, self.width, self.height
            )))?;

        let mut bytes: Vec<u8> = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| ReportError::Render(format!("PNG encoding failed for '{}': {}", self.name, e)))?;
        Ok(bytes)
    }
}

pub(crate) fn render_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Render(e.to_string())
}

/// Draw `view` as a chart of the given kind into memory.
pub fn draw(
    view: &AggregateView,
    kind: ChartKind,
    style: &ChartStyle,
    size: (u32, u32),
) -> Result<RenderedChart, ReportError> {
    if view.is_empty() {
        return Err(ReportError::EmptyView(view.name.clone()));
    }
    let (width, height) = size;
    if width == 0 || height == 0 {
        return Err(ReportError::Render(format!("invalid chart size {}x{}", width, height)));
    }

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        match kind {
            ChartKind::Bar => bar::draw_bar(&root, view, style)?,
            ChartKind::Pie => pie::draw_pie(&root, view, style)?,
        }
        root.present().map_err(render_error)?;
    }

    debug!(report = %view.name, groups = view.len(), ?kind, "Chart drawn");
    Ok(RenderedChart {
        name: view.name.clone(),
        width,
        height,
        pixels,
    })
}

/// Encode `chart` as PNG and write it to `output_path`, replacing any existing file.
///
/// The bytes land in a hidden sibling first and are renamed into place, so a
/// failed write never leaves a truncated image at `output_path`.
pub fn save(chart: &RenderedChart, output_path: &Path) -> Result<ChartArtifact, ReportError> {
    let bytes = chart.encode_png()?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_sibling(output_path);
    if let Err(e) = std::fs::write(&tmp_path, &bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp_path, output_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(ChartArtifact {
        report: chart.name.clone(),
        path: output_path.to_path_buf(),
        width: chart.width,
        height: chart.height,
        bytes: bytes.len() as u64,
    })
}

/// Draw and save in one step.
pub fn render(
    view: &AggregateView,
    kind: ChartKind,
    style: &ChartStyle,
    output_path: &Path,
    size: (u32, u32),
) -> Result<ChartArtifact, ReportError> {
    let chart = draw(view, kind, style, size)?;
    save(&chart, output_path)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "chart".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Compact axis label: integers without decimals, everything else with two.
pub(crate) fn format_axis_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_reports, sample_products, Field, Metric};
    use crate::pipeline::aggregator::aggregate;
    use tempfile::TempDir;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn brand_counts() -> AggregateView {
        aggregate("top_brands", &sample_products(), Field::Brand, Metric::Count).unwrap()
    }

    fn bar_style() -> ChartStyle {
        default_reports()[0].style.clone()
    }

    #[test]
    fn test_draw_fills_buffer() {
        let chart = draw(&brand_counts(), ChartKind::Bar, &bar_style(), (320, 240)).unwrap();
        assert_eq!(chart.pixels.len(), 320 * 240 * 3);
        // Background is white, bars are not
        assert!(chart.pixels.chunks(3).any(|px| px != [255, 255, 255]));
    }

    #[test]
    fn test_render_writes_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top_brands.png");
        let artifact = render(&brand_counts(), ChartKind::Bar, &bar_style(), &path, (400, 300)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
        assert_eq!(artifact.bytes, bytes.len() as u64);
        assert_eq!(artifact.width, 400);
    }

    #[test]
    fn test_render_twice_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("again.png");
        let view = brand_counts();

        let first = render(&view, ChartKind::Bar, &bar_style(), &path, (400, 300)).unwrap();
        let second = render(&view, ChartKind::Bar, &bar_style(), &path, (400, 300)).unwrap();

        assert_eq!(first.bytes, second.bytes);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), second.bytes);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_render_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("chart.png");
        render(&brand_counts(), ChartKind::Pie, &bar_style(), &path, (300, 300)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_view_is_rejected_without_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        let view = aggregate("empty", &[], Field::Brand, Metric::Count).unwrap();

        let err = render(&view, ChartKind::Bar, &bar_style(), &path, (400, 300)).unwrap_err();
        assert!(matches!(err, ReportError::EmptyView(ref name) if name == "empty"));
        assert!(!path.exists());
    }

    #[test]
    fn test_zero_size_is_render_error() {
        let err = draw(&brand_counts(), ChartKind::Bar, &bar_style(), (0, 300)).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn test_format_axis_value() {
        assert_eq!(format_axis_value(3.0), "3");
        assert_eq!(format_axis_value(2.5), "2.50");
    }
}
