//! Spreadsheet input through `calamine`.
//!
//! The first row of the worksheet is the header. Column types are inferred
//! from the cells below it:
//!
//! - only whole numbers: `Int64`
//! - only numbers: `Float64`
//! - only booleans: `Boolean`
//! - anything else: `Utf8`, with numbers and dates rendered as text
//!
//! Empty cells, empty strings and Excel error cells (`#N/A`, ...) are nulls.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use calamine::{Data, DataType as _, Reader, open_workbook_auto};
use chrono::Timelike;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};
use crate::utils::arrow::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn of(cell: &Data) -> Option<Self> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) if s.is_empty() => None,
            Data::Int(_) => Some(Self::Int),
            Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(Self::Int),
            Data::Float(_) => Some(Self::Float),
            Data::Bool(_) => Some(Self::Bool),
            _ => Some(Self::Text),
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Int | Self::Float, Self::Int | Self::Float) => Self::Float,
            _ => Self::Text,
        }
    }

    fn data_type(self) -> DataType {
        match self {
            Self::Int => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::Bool => DataType::Boolean,
            Self::Text => DataType::Utf8,
        }
    }
}

/// Read one worksheet into a record batch
///
/// # Arguments
/// * `path` - The workbook to open
/// * `sheet_name` - Worksheet to read; the first worksheet when `None`
pub fn read_excel(path: &Path, sheet_name: Option<&str>) -> Result<RecordBatch> {
    // Surface missing files the same way as the other readers
    drop(safe_open_file(path, "reading spreadsheet")?);

    let mut workbook = open_workbook_auto(path)?;
    let range = match sheet_name {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::EmptyWorkbook { path: path.to_path_buf() })??,
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(Error::EmptyWorkbook { path: path.to_path_buf() });
    };
    let names = column_names(header);
    let body: Vec<&[Data]> = rows.collect();
    debug!("Worksheet has {} columns and {} data rows", names.len(), body.len());

    let mut fields = Vec::with_capacity(names.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(names.len());

    for (idx, name) in names.into_iter().enumerate() {
        let cells: Vec<Option<&Data>> = body
            .iter()
            .map(|row| row.get(idx).filter(|cell| ColumnKind::of(cell).is_some()))
            .collect();

        let kind = cells
            .iter()
            .flatten()
            .filter_map(|cell| ColumnKind::of(cell))
            .reduce(ColumnKind::merge)
            .unwrap_or(ColumnKind::Text);

        fields.push(Field::new(name, kind.data_type(), true));
        columns.push(build_column(kind, &cells));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Header names with blanks filled in and repeats made unique
fn column_names(header: &[Data]) -> Vec<String> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell_to_string(cell).unwrap_or_else(|| format!("Unnamed: {idx}"));
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                name
            } else {
                format!("{name}.{}", *count - 1)
            }
        })
        .collect()
}

fn build_column(kind: ColumnKind, cells: &[Option<&Data>]) -> ArrayRef {
    match kind {
        ColumnKind::Int => Arc::new(
            cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Int(i)) => Some(*i),
                    Some(Data::Float(f)) => Some(*f as i64),
                    _ => None,
                })
                .collect::<Int64Array>(),
        ),
        ColumnKind::Float => Arc::new(
            cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Int(i)) => Some(*i as f64),
                    Some(Data::Float(f)) => Some(*f),
                    _ => None,
                })
                .collect::<Float64Array>(),
        ),
        ColumnKind::Bool => Arc::new(
            cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Bool(b)) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        ),
        ColumnKind::Text => Arc::new(
            cells
                .iter()
                .map(|cell| cell.and_then(cell_to_string))
                .collect::<StringArray>(),
        ),
    }
}

/// Render a cell as text; `None` for empty and error cells
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => cell.as_datetime().map(|datetime| {
            if datetime.time().num_seconds_from_midnight() == 0 {
                datetime.format("%Y-%m-%d").to_string()
            } else {
                datetime.format("%Y-%m-%d %H:%M:%S").to_string()
            }
        }),
    }
}
