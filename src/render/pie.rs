use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use crate::errors::ReportError;
use crate::models::{AggregateView, ChartColor, ChartStyle};
use super::render_error;

/// Share of each group in the view total, in percent, rounded to one decimal.
///
/// Tenths are apportioned by largest remainder, so the shares always add up to
/// exactly 100.0. Ties go to the earlier group.
pub fn percentages(view: &AggregateView) -> Vec<f64> {
    let total = view.total();
    if view.groups.is_empty() || total.is_nan() || total <= 0.0 {
        return vec![0.0; view.groups.len()];
    }

    let exact: Vec<f64> = view.groups.iter().map(|g| g.value / total * 1000.0).collect();
    let mut tenths: Vec<i64> = exact.iter().map(|e| e.floor() as i64).collect();
    let deficit = 1000 - tenths.iter().sum::<i64>();

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &i in order.iter().take(deficit.max(0) as usize) {
        tenths[i] += 1;
    }

    tenths.into_iter().map(|t| t as f64 / 10.0).collect()
}

/// Slice labels of the form `Organic (40.0%)`.
pub fn slice_labels(view: &AggregateView) -> Vec<String> {
    view.groups
        .iter()
        .zip(percentages(view))
        .map(|(g, pct)| format!("{} ({:.1}%)", g.key, pct))
        .collect()
}

pub(crate) fn draw_pie(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    view: &AggregateView,
    style: &ChartStyle,
) -> Result<(), ReportError> {
    if view.groups.iter().any(|g| g.value.is_nan() || g.value <= 0.0) {
        return Err(ReportError::Render(format!(
            "pie chart '{}' requires every value to be positive",
            view.name
        )));
    }

    let text_color = RGBColor(40, 40, 40);
    let area = root
        .titled(&style.title, ("sans-serif", 28).into_font().color(&text_color))
        .map_err(render_error)?;

    let (width, height) = area.dim_in_pixel();
    let center: (i32, i32) = ((width / 2) as i32, (height / 2) as i32);
    let radius: f64 = width.min(height) as f64 * 0.32;

    let sizes = view.values();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| {
            let (r, g, b) = ChartColor::PALETTE[i % ChartColor::PALETTE.len()];
            RGBColor(r, g, b)
        })
        .collect();
    let labels = slice_labels(view);

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font().color(&text_color));
    area.draw(&pie).map_err(render_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_products, Field, GroupValue, Metric};
    use crate::pipeline::aggregator::aggregate;

    fn view_of(values: &[f64]) -> AggregateView {
        AggregateView {
            name: "pie".to_string(),
            group_field: Field::Label,
            metric: Metric::Count,
            groups: values
                .iter()
                .enumerate()
                .map(|(i, v)| GroupValue { key: format!("g{}", i), value: *v })
                .collect(),
        }
    }

    #[test]
    fn test_label_percentages_for_sample_data() {
        let view = aggregate("label_count", &sample_products(), Field::Label, Metric::Count).unwrap();
        assert_eq!(percentages(&view), vec![40.0, 40.0, 20.0]);
        assert_eq!(
            slice_labels(&view),
            vec!["Organic (40.0%)", "Vegan (40.0%)", "Cruelty-Free (20.0%)"]
        );
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        let pcts = percentages(&view_of(&[1.0, 2.0]));
        assert_eq!(pcts, vec![33.3, 66.7]);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        for values in [vec![2.0, 2.0, 1.0], vec![1.0, 1.0, 1.0], vec![3.0, 5.0, 7.0, 11.0], vec![9.0]] {
            let sum: f64 = percentages(&view_of(&values)).iter().sum();
            assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "values {:?} summed to {}", values, sum);
        }
    }

    #[test]
    fn test_equal_slices_sum_to_exactly_hundred() {
        let pcts = percentages(&view_of(&[1.0; 6]));
        let tenths: i64 = pcts.iter().map(|p| (p * 10.0).round() as i64).sum();
        assert_eq!(tenths, 1000, "{:?}", pcts);
        for p in &pcts {
            assert!((p - 100.0 / 6.0).abs() <= 0.1 + 1e-9, "{:?}", pcts);
        }
        assert_eq!(pcts, vec![16.7, 16.7, 16.7, 16.7, 16.6, 16.6]);
    }

    #[test]
    fn test_many_slices_keep_exact_total() {
        let mut seed: u64 = 7;
        for len in 2..=40 {
            let values: Vec<f64> = (0..len)
                .map(|_| {
                    seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    ((seed >> 33) % 97 + 1) as f64
                })
                .collect();
            let view = view_of(&values);
            let pcts = percentages(&view);
            let tenths: i64 = pcts.iter().map(|p| (p * 10.0).round() as i64).sum();
            assert_eq!(tenths, 1000, "values {:?} gave {:?}", values, pcts);
            for (v, p) in values.iter().zip(&pcts) {
                let exact = v / view.total() * 100.0;
                assert!((p - exact).abs() < 0.1 + 1e-9, "{} vs {}", p, exact);
            }
        }
    }

    #[test]
    fn test_non_positive_slice_is_rejected() {
        let view = view_of(&[3.0, 0.0]);
        let style = ChartStyle::new("t", "", "", ChartColor::Default);
        let err = crate::render::draw(&view, crate::models::ChartKind::Pie, &style, (200, 200)).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }
}
