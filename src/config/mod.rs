//! Configuration for the repair data pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_open_file;

/// Configuration for both pipeline stages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Repair records spreadsheet read by stage A
    pub repair_data_path: PathBuf,
    /// Work order spreadsheet read by stage A
    pub work_order_data_path: PathBuf,
    /// Merged CSV written by stage A and read by stage B
    pub merged_data_path: PathBuf,
    /// Directory the stage B charts are written to
    pub chart_dir: PathBuf,
    /// Worksheet to read from spreadsheet inputs (first sheet when unset)
    pub sheet_name: Option<String>,
    /// Column shared by both inputs
    pub join_key: String,
    /// Monetary columns normalized from currency text to floats
    pub currency_columns: Vec<String>,
    /// Column names used by the analysis stage
    pub columns: ColumnConfig,
    /// Accepted invoice date formats
    pub date_formats: DateFormatConfig,
    /// Number of rows shown in table previews
    pub preview_rows: usize,
    /// Records sampled when inferring a CSV schema
    pub csv_infer_records: usize,
    /// Whether stage B renders charts
    pub render_charts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repair_data_path: PathBuf::from("Repair Data.xlsx"),
            work_order_data_path: PathBuf::from("Work Order Data.xlsx"),
            merged_data_path: PathBuf::from("merged_data.csv"),
            chart_dir: PathBuf::from("charts"),
            sheet_name: None,
            join_key: "Order No".to_string(),
            currency_columns: vec!["Revenue".to_string(), "Cost".to_string()],
            columns: ColumnConfig::default(),
            date_formats: DateFormatConfig::default(),
            preview_rows: 5,
            csv_infer_records: 1000,
            render_charts: true,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "pipeline configuration")?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Columns read as text from CSV input whatever type sampling suggests
    ///
    /// Currency and invoice date cells are parsed downstream, where a bad
    /// cell is either reported with its row or skipped.
    #[must_use]
    pub fn text_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.currency_columns.iter().map(String::as_str).collect();
        columns.extend([
            self.columns.invoice_date.as_str(),
            self.columns.revenue.as_str(),
            self.columns.cost.as_str(),
        ]);
        columns.sort_unstable();
        columns.dedup();
        columns
    }
}

/// Column names read by the analysis stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub invoice_date: String,
    pub revenue: String,
    pub cost: String,
    pub actual_hours: String,
    pub failure_condition: String,
    pub fix_condition: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            invoice_date: "Invoice Date".to_string(),
            revenue: "Revenue".to_string(),
            cost: "Cost".to_string(),
            actual_hours: "Actual Hours".to_string(),
            failure_condition: "Failure Condition - Failure Component".to_string(),
            fix_condition: "Fix Condition - Fix Component".to_string(),
        }
    }
}

/// Configuration for date format handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Date-only format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Date-time format strings; the time part is discarded after parsing
    pub datetime_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%m/%d/%Y".to_string(), // US: 01/15/2023
                "%d/%m/%Y".to_string(), // UK: 15/01/2023
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%d-%m-%Y".to_string(), // European: 15-01-2023
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%d %b %Y".to_string(), // 15 Jan 2023
                "%d %B %Y".to_string(), // 15 January 2023
                "%b %d, %Y".to_string(), // Jan 15, 2023
            ],
            datetime_formats: vec![
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
                "%m/%d/%Y %H:%M:%S".to_string(),
                "%m/%d/%Y %H:%M".to_string(),
            ],
            enable_format_detection: true,
        }
    }
}
