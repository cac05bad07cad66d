//! CSV input and output through Arrow's CSV reader and writer.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::util::{safe_create_file, safe_open_file};
use crate::error::{Error, Result};
use crate::utils::logging::log_operation_complete;

/// Read a CSV file with a header row, inferring column types
///
/// `infer_records` caps how many records are sampled for inference; `0`
/// samples the whole file. Columns that are empty in every sampled record
/// are read as text, as are the `text_columns` (matched on the trimmed
/// header) whatever their sampled type, so a late cell that does not fit
/// the sample cannot fail the whole read.
pub fn read_csv(path: &Path, infer_records: usize, text_columns: &[&str]) -> Result<RecordBatch> {
    let mut file = safe_open_file(path, "reading CSV file")?;

    let format = Format::default().with_header(true);
    let max_records = (infer_records > 0).then_some(infer_records);
    let (schema, _) = format.infer_schema(&mut file, max_records)?;
    file.rewind()
        .map_err(|e| Error::io(path, "Failed to rewind CSV file after schema inference", e))?;

    let schema = Arc::new(fields_as_text(&schema, text_columns));
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Write a record batch as CSV with a header row, replacing any existing file
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = safe_create_file(path, "writing CSV file")?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;

    log_operation_complete("wrote", path, batch.num_rows(), None);
    Ok(())
}

fn fields_as_text(schema: &Schema, text_columns: &[&str]) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| {
            let forced = text_columns.contains(&field.name().trim());
            if forced || *field.data_type() == DataType::Null {
                Field::new(field.name(), DataType::Utf8, true)
            } else {
                field.as_ref().clone()
            }
        })
        .collect();
    Schema::new(fields)
}
