//! Utilities for working with Arrow arrays.
//!
//! Column lookup, downcasting and column replacement on record batches. All
//! helpers return new batches; the input batch is never modified.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns `Error::ColumnNotFound` if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| Error::column_not_found(column_name))
}

/// Get a column from a record batch by name
///
/// # Errors
/// Returns `Error::ColumnNotFound` if the column does not exist
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx).clone())
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| Error::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
            actual: array.data_type().to_string(),
        })
}

/// Return a copy of `batch` with the named column swapped for `array`
///
/// The field keeps its name and nullability but takes the data type of the
/// new array.
pub fn replace_column(batch: &RecordBatch, column_name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let idx = get_column_index(batch, column_name)?;
    let schema = batch.schema();

    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if i == idx {
                Field::new(field.name(), array.data_type().clone(), true)
            } else {
                field.as_ref().clone()
            }
        })
        .collect();

    let mut columns = batch.columns().to_vec();
    columns[idx] = array;

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Strip leading and trailing whitespace from every column name
pub fn trim_column_names(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| {
            let trimmed = field.name().trim();
            if trimmed != field.name() {
                debug!("Renaming column '{}' to '{trimmed}'", field.name());
            }
            field.as_ref().clone().with_name(trimmed)
        })
        .collect();

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        batch.columns().to_vec(),
    )?)
}

/// Cast a numeric column to `Float64`
///
/// # Errors
/// Returns `Error::InvalidDataType` for non-numeric columns
pub fn cast_to_float64(array: &ArrayRef, column_name: &str) -> Result<ArrayRef> {
    match array.data_type() {
        DataType::Float64 => Ok(array.clone()),
        dt if dt.is_numeric() || *dt == DataType::Null => {
            Ok(cast::cast(array.as_ref(), &DataType::Float64)?)
        }
        other => Err(Error::InvalidDataType {
            column: column_name.to_string(),
            expected: "numeric".to_string(),
            actual: other.to_string(),
        }),
    }
}
