use std::path::{Path, PathBuf};

use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;
use repair_insight::PipelineConfig;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

/// Repair records with one exact duplicate, one forward-fillable gap and one
/// order without a work order
pub const REPAIR_CSV: &str = "\
Order No,Revenue,Cost,Complaint,Failure Condition - Failure Component,Fix Condition - Fix Component
1001,\"$1,200.00\",$800.00,Engine noise,Worn - Bearing,Replace - Bearing
1001,\"$1,200.00\",$800.00,Engine noise,Worn - Bearing,Replace - Bearing
1002,$450.50,$300.25,,Leak - Hose,Replace - Hose
1003,$99.99,$40.00,Rattle,Loose - Panel,Tighten - Panel
1004,\"$2,000.00\",\"$1,500.00\",Overheating,Leak - Hose,Replace - Radiator
1099,$10.00,$5.00,Orphan,Loose - Panel,Tighten - Panel
";

/// Work orders with one unparseable invoice date and one order without repairs
pub const WORK_ORDER_CSV: &str = "\
Order No,Invoice Date,Actual Hours
1001,2023-01-15,6.5
1002,2023-01-28,2.0
1003,2023-03-02,1.0
1004,pending,12.0
2000,2023-02-10,3.0
";

/// Write a fixture file into `dir`
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// Configuration pointing every path into `dir`
#[must_use]
pub fn test_config(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        repair_data_path: dir.join("Repair Data.csv"),
        work_order_data_path: dir.join("Work Order Data.csv"),
        merged_data_path: dir.join("merged_data.csv"),
        chart_dir: dir.join("charts"),
        preview_rows: 3,
        ..Default::default()
    }
}

/// Write both standard fixtures and return a matching configuration
#[must_use]
pub fn standard_fixtures(dir: &Path) -> PipelineConfig {
    let config = test_config(dir);
    write_fixture(dir, "Repair Data.csv", REPAIR_CSV);
    write_fixture(dir, "Work Order Data.csv", WORK_ORDER_CSV);
    config
}

/// Values of a `Float64` column, nulls as `None`
pub fn float_column(batch: &RecordBatch, name: &str) -> Vec<Option<f64>> {
    let array = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("column {name} missing"));
    let floats = array
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap_or_else(|| panic!("column {name} is {}", array.data_type()));
    floats.iter().collect()
}

/// One spreadsheet cell for [`write_workbook`]
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// Year, month, day; stored as a real Excel date cell
    Date(u16, u8, u8),
    Blank,
}

/// Write a workbook with one worksheet per `(name, rows)` entry, in order
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (row, cells) in rows.iter().enumerate() {
            let row = row as u32;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match *cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text).unwrap();
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row, col, value).unwrap();
                    }
                    Cell::Date(year, month, day) => {
                        let date = ExcelDateTime::from_ymd(year, month, day).unwrap();
                        worksheet
                            .write_datetime_with_format(row, col, &date, &date_format)
                            .unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path).unwrap();
}
