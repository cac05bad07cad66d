//! Exact duplicate row detection.

use arrow::array::UInt32Array;
use arrow::compute::take_record_batch;
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, SortField};
use rustc_hash::FxHashSet;

use crate::error::Result;

/// Indices of the first occurrence of every distinct row, in table order
///
/// Rows are compared across all columns; nulls compare equal to nulls.
pub fn first_occurrence_indices(batch: &RecordBatch) -> Result<Vec<u32>> {
    if batch.num_columns() == 0 {
        return Ok((0..batch.num_rows().min(1) as u32).collect());
    }

    let sort_fields = batch
        .schema()
        .fields()
        .iter()
        .map(|field| SortField::new(field.data_type().clone()))
        .collect();
    let converter = RowConverter::new(sort_fields)?;
    let rows = converter.convert_columns(batch.columns())?;

    let mut seen = FxHashSet::default();
    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| seen.insert(row).then_some(idx as u32))
        .collect())
}

/// Number of rows that repeat an earlier row exactly
pub fn duplicate_row_count(batch: &RecordBatch) -> Result<usize> {
    Ok(batch.num_rows() - first_occurrence_indices(batch)?.len())
}

/// Drop exact duplicate rows, keeping the first occurrence
pub fn drop_duplicates(batch: &RecordBatch) -> Result<RecordBatch> {
    let indices = first_occurrence_indices(batch)?;
    if indices.len() == batch.num_rows() {
        return Ok(batch.clone());
    }

    Ok(take_record_batch(batch, &UInt32Array::from(indices))?)
}
