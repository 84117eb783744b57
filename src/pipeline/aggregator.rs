use std::collections::HashMap;
use crate::errors::ReportError;
use crate::models::{AggregateView, Field, GroupValue, Metric, ProductRecord};

/// Group `dataset` by `group_field` and compute `metric` for every group.
///
/// Groups keep the order in which their key first appears. An empty dataset
/// produces a view with no groups.
pub fn aggregate(
    name: &str,
    dataset: &[ProductRecord],
    group_field: Field,
    metric: Metric,
) -> Result<AggregateView, ReportError> {
    let mut order: Vec<String> = Vec::new();
    let mut members: HashMap<String, Vec<&ProductRecord>> = HashMap::new();

    for record in dataset {
        let key = record.value(group_field).group_key();
        members
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }

    let mut groups = Vec::with_capacity(order.len());
    for key in order {
        let records = &members[&key];
        let value = match metric {
            Metric::Count => records.len() as f64,
            Metric::AverageOf(field) => mean(records, field)?,
        };
        groups.push(GroupValue { key, value });
    }

    Ok(AggregateView {
        name: name.to_string(),
        group_field,
        metric,
        groups,
    })
}

fn mean(records: &[&ProductRecord], field: Field) -> Result<f64, ReportError> {
    let mut sum = 0.0;
    for record in records {
        let value = record.value(field);
        sum += value.as_f64().ok_or_else(|| ReportError::TypeMismatch {
            field: field.to_string(),
            found: value.kind().to_string(),
        })?;
    }
    Ok(sum / records.len() as f64)
}
