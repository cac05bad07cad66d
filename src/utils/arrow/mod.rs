//! Arrow data handling utilities
//!
//! This module contains utilities for working with Arrow arrays and record
//! batches: column lookup by name, column replacement, and per-cell value
//! extraction used by the cleaning, join and aggregation code.

pub mod array_utils;
pub mod conversion;

// Re-export commonly used functions for convenience
pub use array_utils::{
    cast_to_float64, downcast_array, get_column_by_name, get_column_index, replace_column,
    trim_column_names,
};
pub use conversion::{arrow_array_to_f64, arrow_array_to_string, format_number};
