//! Ranked count and mean-cost summaries per condition label.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{Array, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use super::{label_values, numeric_column};
use crate::config::PipelineConfig;
use crate::error::Result;

/// Occurrences and mean cost of one category label
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSummary {
    pub label: String,
    /// Rows carrying this label
    pub count: usize,
    /// Mean over the rows with a cost; `None` when no row has one
    pub mean_cost: Option<f64>,
}

/// Count and mean cost per label, sorted by mean cost descending
///
/// Groups start in ascending label order and the sort is stable, so equal
/// means keep that order. Labels without any cost sort last.
pub fn condition_summary(
    batch: &RecordBatch,
    label_column: &str,
    cost_column: &str,
) -> Result<Vec<ConditionSummary>> {
    let labels = label_values(batch, label_column)?;
    let cost = numeric_column(batch, cost_column)?;

    // label -> (count, cost sum, rows with cost)
    let mut groups: BTreeMap<String, (usize, f64, usize)> = BTreeMap::new();
    for (row, label) in labels.into_iter().enumerate() {
        let Some(label) = label else { continue };
        let group = groups.entry(label).or_insert((0, 0.0, 0));
        group.0 += 1;
        if cost.is_valid(row) {
            group.1 += cost.value(row);
            group.2 += 1;
        }
    }

    let mut summaries: Vec<ConditionSummary> = groups
        .into_iter()
        .map(|(label, (count, sum, with_cost))| ConditionSummary {
            label,
            count,
            mean_cost: (with_cost > 0).then(|| sum / with_cost as f64),
        })
        .collect();

    summaries.sort_by(|a, b| descending_mean(a.mean_cost, b.mean_cost));
    Ok(summaries)
}

fn descending_mean(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ranked summary of the failure condition column
pub fn failure_analysis(batch: &RecordBatch, config: &PipelineConfig) -> Result<Vec<ConditionSummary>> {
    condition_summary(batch, &config.columns.failure_condition, &config.columns.cost)
}

/// Ranked summary of the fix condition column
pub fn fix_analysis(batch: &RecordBatch, config: &PipelineConfig) -> Result<Vec<ConditionSummary>> {
    condition_summary(batch, &config.columns.fix_condition, &config.columns.cost)
}

/// Three-column table (label, `Count`, `Average Cost`) for console output
pub fn summaries_to_record_batch(label_header: &str, summaries: &[ConditionSummary]) -> Result<RecordBatch> {
    let schema = Schema::new(vec![
        Field::new(label_header, DataType::Utf8, false),
        Field::new("Count", DataType::UInt64, false),
        Field::new("Average Cost", DataType::Float64, true),
    ]);
    let labels = StringArray::from_iter_values(summaries.iter().map(|s| s.label.as_str()));
    let counts: UInt64Array = summaries.iter().map(|s| Some(s.count as u64)).collect();
    let means: Float64Array = summaries.iter().map(|s| s.mean_cost).collect();

    Ok(RecordBatch::try_new(
        Arc::new(schema),
        vec![Arc::new(labels), Arc::new(counts), Arc::new(means)],
    )?)
}
