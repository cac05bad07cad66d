//! Module for reading tabular input files into Arrow record batches.
//!
//! Every reader returns a single `RecordBatch` holding the whole file; the
//! pipeline works on complete in-memory tables.

pub mod csv;
pub mod excel;
pub mod parquet;

use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use self::csv::{read_csv, write_csv};
pub use self::excel::read_excel;
pub use self::parquet::read_parquet;

/// Tabular file formats accepted as pipeline input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Spreadsheet workbooks (xlsx, xlsm, xlsb, xls, ods)
    Spreadsheet,
    /// Comma-delimited text with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl TableFormat {
    /// Detect the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "csv" => Some(Self::Csv),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Load a tabular file, picking the reader from its extension
///
/// # Errors
/// Returns `Error::FileNotFound` when the file is missing and
/// `Error::UnsupportedFormat` for unknown extensions.
pub fn load_table(path: &Path, config: &PipelineConfig) -> Result<RecordBatch> {
    let format =
        TableFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat { path: path.to_path_buf() })?;

    let start = Instant::now();
    log_operation_start("Reading table", path);

    let batch = match format {
        TableFormat::Spreadsheet => read_excel(path, config.sheet_name.as_deref())?,
        TableFormat::Csv => read_csv(path, config.csv_infer_records, &config.text_columns())?,
        TableFormat::Parquet => read_parquet(path)?,
    };

    log_operation_complete("read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}
