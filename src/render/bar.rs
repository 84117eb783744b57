use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::errors::ReportError;
use crate::models::{AggregateView, ChartStyle};
use super::{format_axis_value, render_error};

/// Value axis bounds: always include zero, pad 10% past the extremes.
pub(crate) fn value_range(values: &[f64]) -> (f64, f64) {
    let min_val = values.iter().cloned().fold(0.0_f64, f64::min);
    let max_val = values.iter().cloned().fold(0.0_f64, f64::max);

    let span = max_val - min_val;
    let padding = if span > 0.0 { span * 0.1 } else { 1.0 };

    let low = if min_val < 0.0 { min_val - padding } else { 0.0 };
    let high = if max_val > 0.0 { max_val + padding } else { padding };
    (low, high)
}

pub(crate) fn draw_bar(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    view: &AggregateView,
    style: &ChartStyle,
) -> Result<(), ReportError> {
    let keys = view.keys();
    let values = view.values();
    let (y_min, y_max) = value_range(&values);

    let (r, g, b) = style.color.rgb();
    let fill = RGBColor(r, g, b);
    let text_color = RGBColor(40, 40, 40);

    let mut chart = ChartBuilder::on(root)
        .caption(&style.title, ("sans-serif", 28).into_font().color(&text_color))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0..keys.len()).into_segmented(), y_min..y_max)
        .map_err(render_error)?;

    let x_formatter = |x: &SegmentValue<usize>| match x {
        SegmentValue::CenterOf(i) => keys.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let y_formatter = |y: &f64| format_axis_value(*y);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .x_labels(keys.len())
        .y_labels(10)
        .x_label_style(("sans-serif", 16).into_font().color(&text_color))
        .y_label_style(("sans-serif", 14).into_font().color(&text_color))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .light_line_style(ShapeStyle::from(&RGBColor(230, 230, 230)).stroke_width(1))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(fill.filled())
                .margin(12)
                .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
        )
        .map_err(render_error)?;

    Ok(())
}
