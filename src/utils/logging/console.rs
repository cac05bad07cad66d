//! Console output utilities
//!
//! This module provides utilities for formatted console output of tables.

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;

/// Print column names, types and row count
pub fn print_schema_info(title: &str, batch: &RecordBatch) {
    println!("{title}: {} rows, {} columns", batch.num_rows(), batch.num_columns());
    for field in batch.schema().fields() {
        let nullable = if field.is_nullable() { "nullable" } else { "non-null" };
        println!("  - {} ({}, {nullable})", field.name(), field.data_type());
    }
}

/// Print the first `num_rows` rows as a formatted table
pub fn print_head(batch: &RecordBatch, num_rows: usize) -> Result<()> {
    let head = batch.slice(0, num_rows.min(batch.num_rows()));
    print_record_batch(&head)
}

/// Print a whole record batch as a formatted table
pub fn print_record_batch(batch: &RecordBatch) -> Result<()> {
    println!("{}", pretty_format_batches(std::slice::from_ref(batch))?);
    Ok(())
}

/// Print per-column missing-value counts
pub fn print_missing_values(title: &str, counts: &[(String, usize)]) {
    println!("{title}:");
    let width = counts.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, count) in counts {
        println!("  {name:<width$}  {count}");
    }
}
