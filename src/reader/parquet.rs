//! Parquet input through the `parquet` crate's Arrow reader.

use std::path::Path;

use ::parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use arrow::compute::concat_batches;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::error::util::safe_open_file;

/// Read a whole Parquet file into one record batch
pub fn read_parquet(path: &Path) -> Result<RecordBatch> {
    let file = safe_open_file(path, "reading parquet file")?;

    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = reader_builder.schema().clone();
    let reader = reader_builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, &batches)?)
}
