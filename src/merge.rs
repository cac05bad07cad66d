//! Inner join of cleaned repair records with work order records.

use std::sync::Arc;

use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::utils::arrow::{arrow_array_to_string, get_column_by_name, get_column_index};

/// Suffix for non-key columns present on both sides, left table
pub const LEFT_SUFFIX: &str = "_x";
/// Suffix for non-key columns present on both sides, right table
pub const RIGHT_SUFFIX: &str = "_y";

/// Row accounting for one join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinReport {
    pub left_rows: usize,
    pub right_rows: usize,
    pub output_rows: usize,
    /// Left rows whose key found no partner (null keys included)
    pub left_unmatched: usize,
    /// Right rows whose key found no partner (null keys included)
    pub right_unmatched: usize,
}

/// Inner join two tables on a shared key column
///
/// Output rows follow the left table's order; a left row matching several
/// right rows appears once per match, in right-table order. Null keys never
/// match. Keys compare on their textual form with whole floats written as
/// integers, so `1` and `1.0` join.
///
/// The output holds every left column, then every right column except the
/// key. Other column names present on both sides get the `_x` / `_y`
/// suffixes.
pub fn inner_join(left: &RecordBatch, right: &RecordBatch, key: &str) -> Result<(RecordBatch, JoinReport)> {
    let left_key = get_column_by_name(left, key)?;
    let right_key = get_column_by_name(right, key)?;
    let right_key_idx = get_column_index(right, key)?;

    let mut right_index: FxHashMap<String, Vec<u32>> = FxHashMap::default();
    for row in 0..right.num_rows() {
        if let Some(value) = arrow_array_to_string(right_key.as_ref(), row) {
            right_index.entry(value).or_default().push(row as u32);
        }
    }

    let mut left_indices = Vec::with_capacity(left.num_rows());
    let mut right_indices = Vec::with_capacity(left.num_rows());
    let mut right_matched = vec![false; right.num_rows()];
    let mut left_unmatched = 0;

    for row in 0..left.num_rows() {
        let matches = arrow_array_to_string(left_key.as_ref(), row).and_then(|value| right_index.get(&value));
        match matches {
            Some(matches) => {
                for &right_row in matches {
                    left_indices.push(row as u32);
                    right_indices.push(right_row);
                    right_matched[right_row as usize] = true;
                }
            }
            None => left_unmatched += 1,
        }
    }

    let left_take = UInt32Array::from(left_indices);
    let right_take = UInt32Array::from(right_indices);

    let left_schema = left.schema();
    let right_schema = right.schema();
    let left_names: FxHashSet<&str> = left_schema.fields().iter().map(|f| f.name().as_str()).collect();
    let right_names: FxHashSet<&str> = right_schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != right_key_idx)
        .map(|(_, f)| f.name().as_str())
        .collect();

    let mut fields = Vec::with_capacity(left.num_columns() + right.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(left.num_columns() + right.num_columns());

    for (field, array) in left_schema.fields().iter().zip(left.columns()) {
        let name = if field.name() != key && right_names.contains(field.name().as_str()) {
            format!("{}{LEFT_SUFFIX}", field.name())
        } else {
            field.name().clone()
        };
        fields.push(Field::new(name, field.data_type().clone(), true));
        columns.push(take(array.as_ref(), &left_take, None)?);
    }

    for (idx, (field, array)) in right_schema.fields().iter().zip(right.columns()).enumerate() {
        if idx == right_key_idx {
            continue;
        }
        let name = if left_names.contains(field.name().as_str()) {
            format!("{}{RIGHT_SUFFIX}", field.name())
        } else {
            field.name().clone()
        };
        fields.push(Field::new(name, field.data_type().clone(), true));
        columns.push(take(array.as_ref(), &right_take, None)?);
    }

    let output_rows = left_take.len();
    let options = RecordBatchOptions::new().with_row_count(Some(output_rows));
    let merged = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;

    let report = JoinReport {
        left_rows: left.num_rows(),
        right_rows: right.num_rows(),
        output_rows,
        left_unmatched,
        right_unmatched: right_matched.iter().filter(|matched| !**matched).count(),
    };

    info!(
        "Inner join on '{key}': {} x {} rows -> {} rows",
        report.left_rows, report.right_rows, report.output_rows
    );
    if report.left_unmatched > 0 || report.right_unmatched > 0 {
        warn!(
            "Inner join on '{key}' dropped {} left rows and {} right rows without a partner",
            report.left_unmatched, report.right_unmatched
        );
    }

    Ok((merged, report))
}
