//! Cleans, merges and analyzes repair and work order spreadsheets.
//!
//! The pipeline runs in two stages that communicate only through a merged
//! CSV file:
//!
//! 1. [`run_stage_a`] loads the repair and work order tables, cleans the
//!    repair records (forward fill, duplicate removal, currency
//!    normalization), inner-joins both on the order number and writes the
//!    merged table.
//! 2. [`run_stage_b`] reads the merged table and derives monthly revenue, a
//!    failure/fix condition cost pivot and ranked condition summaries, and
//!    renders charts.

pub mod analysis;
pub mod charts;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod reader;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{ColumnConfig, DateFormatConfig, PipelineConfig};
pub use error::{Error, Result};
pub use pipeline::{StageAOutcome, StageBOutcome, run, run_stage_a, run_stage_b};

// Cleaning and joining
pub use cleaning::{
    CleaningReport, clean_repair_data, drop_duplicates, duplicate_row_count, forward_fill,
    missing_value_counts, normalize_currency_columns, parse_currency,
};
pub use merge::{JoinReport, inner_join};

// Aggregations
pub use analysis::{
    ConditionPivot, ConditionSummary, MonthlyRevenue, condition_pivot, condition_summary,
    failure_analysis, fix_analysis, monthly_revenue,
};

// Table IO
pub use reader::{TableFormat, load_table, read_csv, write_csv};

// Arrow types
pub use arrow::record_batch::RecordBatch;
