//! Monthly revenue aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{Array, Date32Array, Float64Array, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use log::info;

use super::numeric_column;
use crate::config::{DateFormatConfig, PipelineConfig};
use crate::error::Result;
use crate::utils::arrow::{arrow_array_to_string, downcast_array, get_column_by_name};
use crate::utils::dates::{month_start, next_month_start, parse_date_string};

/// Total revenue of one calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRevenue {
    /// First day of the month
    pub month: NaiveDate,
    pub total: f64,
}

impl MonthlyRevenue {
    /// `YYYY-MM` label of the month
    #[must_use]
    pub fn label(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}

/// Parse the invoice date column
///
/// Date and timestamp columns are converted directly; text columns are tried
/// against the configured formats. Cells that fail to parse are `None`.
pub fn invoice_dates(
    batch: &RecordBatch,
    column_name: &str,
    formats: &DateFormatConfig,
) -> Result<Vec<Option<NaiveDate>>> {
    let array = get_column_by_name(batch, column_name)?;

    match array.data_type() {
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let converted = cast::cast(array.as_ref(), &DataType::Date32)?;
            let dates = downcast_array::<Date32Array>(&converted, column_name, "Date32")?;
            Ok((0..dates.len())
                .map(|row| dates.is_valid(row).then(|| dates.value_as_date(row)).flatten())
                .collect())
        }
        _ => Ok((0..array.len())
            .map(|row| {
                arrow_array_to_string(array.as_ref(), row)
                    .and_then(|text| parse_date_string(&text, formats))
            })
            .collect()),
    }
}

/// Sum revenue per calendar month, in chronological order
///
/// Rows whose invoice date is missing or unparseable are left out of this
/// aggregate only. Months between the first and last observed month with no
/// rows are reported with a zero total.
pub fn monthly_revenue(batch: &RecordBatch, config: &PipelineConfig) -> Result<Vec<MonthlyRevenue>> {
    let dates = invoice_dates(batch, &config.columns.invoice_date, &config.date_formats)?;
    let revenue = numeric_column(batch, &config.columns.revenue)?;

    let excluded = dates.iter().filter(|date| date.is_none()).count();
    if excluded > 0 {
        info!("Excluded {excluded} rows without a valid invoice date from the monthly revenue");
    }

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (row, date) in dates.iter().enumerate() {
        let Some(date) = date else { continue };
        let total = totals.entry(month_start(*date)).or_insert(0.0);
        if revenue.is_valid(row) {
            *total += revenue.value(row);
        }
    }

    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Ok(Vec::new());
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(MonthlyRevenue {
            month,
            total: totals.get(&month).copied().unwrap_or(0.0),
        });
        match next_month_start(month) {
            Some(next) => month = next,
            None => break,
        }
    }

    Ok(series)
}

/// Two-column table (`Month`, `Total Revenue`) for console output
pub fn monthly_revenue_to_record_batch(series: &[MonthlyRevenue]) -> Result<RecordBatch> {
    let schema = Schema::new(vec![
        Field::new("Month", DataType::Utf8, false),
        Field::new("Total Revenue", DataType::Float64, false),
    ]);
    let months: StringArray = series.iter().map(|m| Some(m.label())).collect();
    let totals: Float64Array = series.iter().map(|m| Some(m.total)).collect();

    Ok(RecordBatch::try_new(
        Arc::new(schema),
        vec![Arc::new(months), Arc::new(totals)],
    )?)
}
