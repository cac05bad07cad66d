//! Error handling for the repair data pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while loading, cleaning, merging or analyzing repair data
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input file does not exist
    #[error("File not found: {} (needed for: {purpose})", path.display())]
    FileNotFound { path: PathBuf, purpose: String },

    /// Error opening, reading or writing a file
    #[error("IO error on {}: {context}: {source}", path.display())]
    Io {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading Parquet input
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading a spreadsheet workbook
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The input file extension is not a known tabular format
    #[error("Unsupported input format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The workbook holds no usable worksheet
    #[error("No worksheet found in {}", path.display())]
    EmptyWorkbook { path: PathBuf },

    /// A required column is missing from a table
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column holds a type the operation cannot work with
    #[error("Column '{column}' has type {actual}, expected {expected}")]
    InvalidDataType {
        column: String,
        expected: String,
        actual: String,
    },

    /// A currency or number string could not be parsed
    #[error("Invalid number {value:?}: {reason}")]
    InvalidNumber { value: String, reason: String },

    /// A cell could not be parsed into the expected type
    #[error("Parse error in column '{column}' at row {row}: {value:?} ({reason})")]
    Parse {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    /// A chart could not be rendered
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// Invalid configuration file
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path and operation it belongs to
    pub fn io(path: impl Into<PathBuf>, context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            context: context.into(),
            source,
        }
    }

    /// Shorthand for a missing column
    pub fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }

    /// Attach the column and row to a bare number parse failure
    #[must_use]
    pub fn at(self, column: &str, row: usize) -> Self {
        match self {
            Self::InvalidNumber { value, reason } => Self::Parse {
                column: column.to_string(),
                row,
                value,
                reason,
            },
            other => other,
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
