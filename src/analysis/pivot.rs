//! Failure/fix condition pivot of mean cost.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use super::{label_values, numeric_column};
use crate::config::PipelineConfig;
use crate::error::Result;

/// Mean cost keyed by failure condition (rows) and fix condition (columns)
///
/// Labels are sorted ascending. A combination that never occurs is `None`,
/// which renders as an empty cell rather than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionPivot {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<Option<f64>>>,
}

impl ConditionPivot {
    /// Mean cost of one combination, if it occurs
    #[must_use]
    pub fn get(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let row = self.row_labels.iter().position(|l| l == row_label)?;
        let column = self.column_labels.iter().position(|l| l == column_label)?;
        self.cells[row][column]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.column_labels.is_empty()
    }

    /// Range of the filled cells, `None` when no cell is filled
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .minmax_by(f64::total_cmp)
            .into_option()
    }

    /// Table form: one text column of row labels, one float column per fix condition
    pub fn to_record_batch(&self, row_header: &str) -> Result<RecordBatch> {
        let mut fields = vec![Field::new(row_header, DataType::Utf8, false)];
        let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from_iter_values(&self.row_labels))];

        for (idx, label) in self.column_labels.iter().enumerate() {
            fields.push(Field::new(label, DataType::Float64, true));
            let values: Float64Array = self.cells.iter().map(|row| row[idx]).collect();
            columns.push(Arc::new(values));
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }
}

/// Pivot mean cost by failure condition and fix condition
///
/// Rows with a missing label on either axis or a missing cost are skipped.
pub fn condition_pivot(batch: &RecordBatch, config: &PipelineConfig) -> Result<ConditionPivot> {
    let failures = label_values(batch, &config.columns.failure_condition)?;
    let fixes = label_values(batch, &config.columns.fix_condition)?;
    let cost = numeric_column(batch, &config.columns.cost)?;

    let mut sums: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
    for (row, (failure, fix)) in failures.into_iter().zip(fixes).enumerate() {
        let (Some(failure), Some(fix)) = (failure, fix) else { continue };
        if cost.is_null(row) {
            continue;
        }
        let entry = sums.entry((failure, fix)).or_insert((0.0, 0));
        entry.0 += cost.value(row);
        entry.1 += 1;
    }

    let row_labels: Vec<String> = sums.keys().map(|(row, _)| row.clone()).dedup().collect();
    let column_labels: Vec<String> = sums
        .keys()
        .map(|(_, column)| column.clone())
        .sorted()
        .dedup()
        .collect();

    let cells = row_labels
        .iter()
        .map(|row| {
            column_labels
                .iter()
                .map(|column| {
                    sums.get(&(row.clone(), column.clone()))
                        .map(|(sum, count)| sum / *count as f64)
                })
                .collect()
        })
        .collect();

    Ok(ConditionPivot {
        row_labels,
        column_labels,
        cells,
    })
}
