//! Currency text normalization.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, LargeStringArray, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};
use crate::utils::arrow::{cast_to_float64, downcast_array, get_column_by_name, replace_column};

/// Parse currency text such as `"$1,234.50"` into a float
///
/// Dollar signs, thousands separators and surrounding whitespace are
/// stripped; whatever remains must be a finite number.
///
/// # Errors
/// Returns `Error::InvalidNumber` when a non-numeric token remains.
pub fn parse_currency(text: &str) -> Result<f64> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let cleaned = cleaned.trim();

    let invalid = |reason: String| Error::InvalidNumber {
        value: text.to_string(),
        reason,
    };

    let value = cleaned.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid("not a finite number".to_string()))
    }
}

/// Parse a column of currency text, reporting the first offending row
fn parse_text_cells<'a>(
    cells: impl Iterator<Item = Option<&'a str>>,
    column_name: &str,
) -> Result<Float64Array> {
    cells
        .enumerate()
        .map(|(row, cell)| {
            cell.map(|text| parse_currency(text).map_err(|e| e.at(column_name, row)))
                .transpose()
        })
        .collect()
}

/// Convert one monetary column to `Float64`
///
/// Text cells go through [`parse_currency`]; numeric columns are cast.
/// Nulls stay null.
pub fn normalize_currency_array(array: &ArrayRef, column_name: &str) -> Result<ArrayRef> {
    let normalized: ArrayRef = match array.data_type() {
        DataType::Utf8 => {
            let text = downcast_array::<StringArray>(array, column_name, "Utf8")?;
            Arc::new(parse_text_cells(text.iter(), column_name)?)
        }
        DataType::LargeUtf8 => {
            let text = downcast_array::<LargeStringArray>(array, column_name, "LargeUtf8")?;
            Arc::new(parse_text_cells(text.iter(), column_name)?)
        }
        _ => cast_to_float64(array, column_name)?,
    };
    Ok(normalized)
}

/// Rewrite each named monetary column as `Float64`
///
/// # Errors
/// Fails on the first malformed cell with `Error::Parse` naming the column,
/// the zero-based row and the offending text.
pub fn normalize_currency_columns(batch: &RecordBatch, columns: &[String]) -> Result<RecordBatch> {
    let mut result = batch.clone();
    for column_name in columns {
        let array = get_column_by_name(&result, column_name)?;
        debug!(
            "Normalizing currency column '{column_name}' from {}",
            array.data_type()
        );
        let normalized = normalize_currency_array(&array, column_name)?;
        result = replace_column(&result, column_name, normalized)?;
    }
    Ok(result)
}
