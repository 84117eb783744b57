use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use super::product::Field;

/// Per-group statistic computed by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Count,
    AverageOf(Field),
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Count => write!(f, "count"),
            Metric::AverageOf(field) => write!(f, "avg({})", field),
        }
    }
}

/// One group of an [`AggregateView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupValue {
    pub key: String,
    pub value: f64,
}

/// Records grouped by one field, with one metric value per group.
/// Groups appear in first-occurrence order of their key in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView {
    pub name: String,
    pub group_field: Field,
    pub metric: Metric,
    pub groups: Vec<GroupValue>,
}

impl AggregateView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.key.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.value).collect()
    }

    pub fn total(&self) -> f64 {
        self.groups.iter().map(|g| g.value).sum()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.groups.iter().find(|g| g.key == key).map(|g| g.value)
    }
}

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub report: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}
