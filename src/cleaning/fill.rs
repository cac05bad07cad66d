//! Forward filling of missing cells.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::record_batch::RecordBatch;
use log::warn;

use crate::error::Result;

/// Forward-fill one array
///
/// Returns the filled array and the number of leading nulls that had no
/// earlier value to copy (these stay null).
pub fn forward_fill_array(array: &ArrayRef) -> Result<(ArrayRef, usize)> {
    if array.null_count() == 0 {
        return Ok((array.clone(), 0));
    }

    let mut last_valid: Option<u32> = None;
    let mut leading_nulls = 0;

    let indices: UInt32Array = (0..array.len())
        .map(|row| {
            if array.is_valid(row) {
                last_valid = Some(row as u32);
            } else if last_valid.is_none() {
                leading_nulls += 1;
            }
            last_valid
        })
        .collect();

    let filled = take(array.as_ref(), &indices, None)?;
    Ok((filled, leading_nulls))
}

/// Forward-fill every column of a record batch
///
/// Each null cell takes the nearest preceding non-null value of its column.
/// Leading nulls of a column are left unfilled and logged.
pub fn forward_fill(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut columns = Vec::with_capacity(batch.num_columns());

    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        let (filled, leading_nulls) = forward_fill_array(array)?;
        if leading_nulls > 0 {
            warn!(
                "Column '{}' starts with {leading_nulls} missing values that cannot be forward-filled",
                field.name()
            );
        }
        columns.push(filled);
    }

    Ok(RecordBatch::try_new(Arc::clone(&schema), columns)?)
}
