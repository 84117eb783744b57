use serde::{Deserialize, Serialize};
use super::product::Field;
use super::view::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Fill color for bar charts. Pie charts cycle through [`ChartColor::PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartColor {
    Default,
    Orange,
    Green,
    Purple,
}

impl ChartColor {
    /// Ten-color categorical palette used for pie slices.
    pub const PALETTE: [(u8, u8, u8); 10] = [
        (31, 119, 180),
        (255, 127, 14),
        (44, 160, 44),
        (214, 39, 40),
        (148, 103, 189),
        (140, 86, 75),
        (227, 119, 194),
        (127, 127, 127),
        (188, 189, 34),
        (23, 190, 207),
    ];

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ChartColor::Default => Self::PALETTE[0],
            ChartColor::Orange => (255, 165, 0),
            ChartColor::Green => (0, 128, 0),
            ChartColor::Purple => (128, 0, 128),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: ChartColor,
}

impl ChartStyle {
    pub fn new(title: &str, x_label: &str, y_label: &str, color: ChartColor) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            color,
        }
    }
}

/// Declarative definition of one aggregate view and the chart drawn from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSpec {
    pub name: String,
    pub group_field: Field,
    pub metric: Metric,
    pub kind: ChartKind,
    pub style: ChartStyle,
    pub file_name: String,
}

impl ReportSpec {
    fn new(name: &str, group_field: Field, metric: Metric, kind: ChartKind, style: ChartStyle) -> Self {
        Self {
            name: name.to_string(),
            group_field,
            metric,
            kind,
            style,
            file_name: format!("{}.png", name),
        }
    }
}

/// The fixed report catalogue, in output order.
pub fn default_reports() -> Vec<ReportSpec> {
    vec![
        ReportSpec::new(
            "top_brands",
            Field::Brand,
            Metric::Count,
            ChartKind::Bar,
            ChartStyle::new("Top Brands", "Brand", "Number of Products", ChartColor::Default),
        ),
        ReportSpec::new(
            "label_count",
            Field::Label,
            Metric::Count,
            ChartKind::Pie,
            ChartStyle::new("Label Distribution", "", "", ChartColor::Default),
        ),
        ReportSpec::new(
            "price_vs_brand",
            Field::Brand,
            Metric::AverageOf(Field::Price),
            ChartKind::Bar,
            ChartStyle::new("Average Price by Brand", "Brand", "Average Price", ChartColor::Orange),
        ),
        ReportSpec::new(
            "brand_vs_rank",
            Field::Brand,
            Metric::AverageOf(Field::Rank),
            ChartKind::Bar,
            ChartStyle::new("Average Ranking by Brand", "Brand", "Average Rank", ChartColor::Green),
        ),
        ReportSpec::new(
            "sensitive_suitability",
            Field::Sensitive,
            Metric::Count,
            ChartKind::Bar,
            ChartStyle::new(
                "Sensitive Skin Suitability",
                "Suitable / Not Suitable",
                "Product Count",
                ChartColor::Purple,
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reports_file_names() {
        let names: Vec<String> = default_reports().into_iter().map(|r| r.file_name).collect();
        assert_eq!(
            names,
            vec![
                "top_brands.png",
                "label_count.png",
                "price_vs_brand.png",
                "brand_vs_rank.png",
                "sensitive_suitability.png",
            ]
        );
    }

    #[test]
    fn test_only_label_count_is_pie() {
        let pies: Vec<String> = default_reports()
            .into_iter()
            .filter(|r| r.kind == ChartKind::Pie)
            .map(|r| r.name)
            .collect();
        assert_eq!(pies, vec!["label_count"]);
    }

    #[test]
    fn test_metric_serializes_snake_case() {
        let json = serde_json::to_value(Metric::AverageOf(Field::Price)).unwrap();
        assert_eq!(json, serde_json::json!({ "average_of": "price" }));
    }
}
