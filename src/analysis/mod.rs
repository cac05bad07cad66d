//! Aggregations over the merged repair table.
//!
//! Nothing here modifies the merged table; each function derives a new view
//! that lives only for the analysis session.

pub mod pivot;
pub mod summary;
pub mod temporal;

use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;

use crate::cleaning::normalize_currency_array;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::utils::arrow::{arrow_array_to_string, downcast_array, get_column_by_name};

pub use pivot::{ConditionPivot, condition_pivot};
pub use summary::{ConditionSummary, condition_summary, failure_analysis, fix_analysis};
pub use temporal::{MonthlyRevenue, invoice_dates, monthly_revenue};

/// Numeric view of a column as `Float64`
///
/// Numeric columns are cast; text columns are parsed as currency so that a
/// merged file holding `"$1,200"` still aggregates.
pub fn numeric_column(batch: &RecordBatch, column_name: &str) -> Result<Float64Array> {
    let array = get_column_by_name(batch, column_name)?;
    let normalized = normalize_currency_array(&array, column_name)?;
    Ok(downcast_array::<Float64Array>(&normalized, column_name, "Float64")?.clone())
}

/// Text labels of a categorical column; nulls stay `None`
pub fn label_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<String>>> {
    let array = get_column_by_name(batch, column_name)?;
    Ok((0..array.len())
        .map(|row| arrow_array_to_string(array.as_ref(), row))
        .collect())
}

/// `(actual hours, cost)` pairs for rows where both are present
pub fn cost_vs_hours(batch: &RecordBatch, config: &PipelineConfig) -> Result<Vec<(f64, f64)>> {
    let hours = numeric_column(batch, &config.columns.actual_hours)?;
    let cost = numeric_column(batch, &config.columns.cost)?;

    Ok((0..batch.num_rows())
        .filter(|&row| hours.is_valid(row) && cost.is_valid(row))
        .map(|row| (hours.value(row), cost.value(row)))
        .collect())
}
