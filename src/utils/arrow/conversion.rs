//! Arrow utility functions for extracting individual values
//!
//! Per-cell extraction from Arrow arrays as strings or floats, handling nulls.

use arrow::array::{
    Array, Float32Array, Float64Array, Int8Array, Int16Array, Int32Array, Int64Array,
    LargeStringArray, StringArray, UInt8Array, UInt16Array, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;

/// Render a float without a trailing `.0` when it holds a whole number
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Extract a string value from an Arrow array at the specified index, handling nulls
///
/// Floats holding whole numbers render without a fractional part so that the
/// same identifier read as `1` from one file and `1.0` from another compares
/// equal.
///
/// # Returns
/// `Some(String)` if the value exists and is not null, otherwise `None`
#[must_use]
pub fn arrow_array_to_string(array: &dyn Array, index: usize) -> Option<String> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Utf8 => {
            let string_array = array.as_any().downcast_ref::<StringArray>()?;
            Some(string_array.value(index).to_string())
        }
        DataType::LargeUtf8 => {
            let string_array = array.as_any().downcast_ref::<LargeStringArray>()?;
            Some(string_array.value(index).to_string())
        }
        DataType::Float32 | DataType::Float64 => arrow_array_to_f64(array, index).map(format_number),
        _ => array_value_to_string(array, index).ok(),
    }
}

/// Extract an f64 value from a numeric Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(f64)` if the value exists, is not null and the array is numeric, otherwise `None`
#[must_use]
pub fn arrow_array_to_f64(array: &dyn Array, index: usize) -> Option<f64> {
    if array.is_null(index) {
        return None;
    }

    macro_rules! value_as_f64 {
        ($array_type:ty) => {
            array
                .as_any()
                .downcast_ref::<$array_type>()
                .map(|a| a.value(index) as f64)
        };
    }

    match array.data_type() {
        DataType::Float64 => array
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(index)),
        DataType::Float32 => value_as_f64!(Float32Array),
        DataType::Int8 => value_as_f64!(Int8Array),
        DataType::Int16 => value_as_f64!(Int16Array),
        DataType::Int32 => value_as_f64!(Int32Array),
        DataType::Int64 => value_as_f64!(Int64Array),
        DataType::UInt8 => value_as_f64!(UInt8Array),
        DataType::UInt16 => value_as_f64!(UInt16Array),
        DataType::UInt32 => value_as_f64!(UInt32Array),
        DataType::UInt64 => value_as_f64!(UInt64Array),
        _ => None,
    }
}
