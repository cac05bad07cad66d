//! Cleaning of raw repair records.
//!
//! Cleaning is a pure transform: forward-fill missing cells, drop exact
//! duplicate rows, then normalize monetary columns to `Float64`. The input
//! table is never modified.

pub mod currency;
pub mod dedup;
pub mod fill;

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use log::info;

use crate::config::PipelineConfig;
use crate::error::Result;

pub use currency::{normalize_currency_array, normalize_currency_columns, parse_currency};
pub use dedup::{drop_duplicates, duplicate_row_count, first_occurrence_indices};
pub use fill::{forward_fill, forward_fill_array};

/// Diagnostics collected while cleaning; informational only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    /// Missing cells per column before filling
    pub missing_before: Vec<(String, usize)>,
    /// Missing cells per column after cleaning
    pub missing_after: Vec<(String, usize)>,
    /// Duplicate rows found after filling, before dropping
    pub duplicates_before: usize,
    pub duplicates_after: usize,
}

impl CleaningReport {
    /// Human readable cleaning summary
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Data Cleaning Summary:\n");
        summary.push_str(&format!("  Rows Before Cleaning: {}\n", self.rows_before));
        summary.push_str(&format!("  Rows After Cleaning: {}\n", self.rows_after));
        summary.push_str(&format!(
            "  Number of Duplicates Before Cleaning: {}\n",
            self.duplicates_before
        ));
        summary.push_str(&format!(
            "  Number of Duplicates After Cleaning: {}\n",
            self.duplicates_after
        ));

        let remaining: Vec<_> = self
            .missing_after
            .iter()
            .filter(|(_, count)| *count > 0)
            .collect();
        if remaining.is_empty() {
            summary.push_str("  Missing Values After Cleaning: none\n");
        } else {
            summary.push_str("  Missing Values After Cleaning (leading gaps):\n");
            for (column, count) in remaining {
                summary.push_str(&format!("    {column}: {count}\n"));
            }
        }
        summary
    }
}

/// Null count of every column, in schema order
#[must_use]
pub fn missing_value_counts(batch: &RecordBatch) -> Vec<(String, usize)> {
    batch
        .schema()
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, array)| (field.name().clone(), array.null_count()))
        .collect()
}

/// Clean a raw repair table
///
/// Forward fill, then drop duplicates, then normalize the configured
/// currency columns.
pub fn clean_repair_data(
    batch: &RecordBatch,
    config: &PipelineConfig,
) -> Result<(RecordBatch, CleaningReport)> {
    let missing_before = missing_value_counts(batch);

    let filled = forward_fill(batch)?;
    let duplicates_before = duplicate_row_count(&filled)?;
    let deduplicated = drop_duplicates(&filled)?;
    let cleaned = normalize_currency_columns(&deduplicated, &config.currency_columns)?;

    let report = CleaningReport {
        rows_before: batch.num_rows(),
        rows_after: cleaned.num_rows(),
        missing_before,
        missing_after: missing_value_counts(&cleaned),
        duplicates_before,
        duplicates_after: duplicate_row_count(&cleaned)?,
    };

    info!(
        "Cleaned repair data: {} -> {} rows, {} duplicates removed",
        report.rows_before, report.rows_after, report.duplicates_before
    );

    Ok((cleaned, report))
}
