//! Tabular query results backed by Arrow record batches.
//!
//! [`DetectionTable`] is the shape every query result takes: rows are
//! observations, columns are named catalog fields. The wrapper adds
//! column-by-name lookup, f64 extraction, and bounds-checked row slicing
//! on top of an immutable [`RecordBatch`]. Slices share the underlying
//! buffers, so taking a row or range never copies column data and never
//! touches the source table.

use std::io::{Read, Seek};
use std::ops::Range;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::{SourceError, SourceResult};

/// One tabular result set from the catalog.
#[derive(Debug, Clone)]
pub struct DetectionTable {
    batch: RecordBatch,
}

impl DetectionTable {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Builds a table from named columns.
    ///
    /// All arrays must have the same length. Intended for callers that
    /// already hold data, and for test fixtures.
    pub fn from_columns(columns: Vec<(&str, ArrayRef)>) -> SourceResult<Self> {
        let batch = RecordBatch::try_from_iter(columns)?;
        Ok(Self { batch })
    }

    /// Decodes a CSV response body into a table.
    ///
    /// The first line must be the header row. Column types are inferred
    /// from the data, then the whole body is read into a single batch.
    pub fn from_csv<R: Read + Seek>(mut reader: R) -> SourceResult<Self> {
        let format = Format::default().with_header(true);
        let (schema, _) = format.infer_schema(&mut reader, None)?;
        reader.rewind().map_err(ArrowError::from)?;

        let schema = Arc::new(schema);
        let csv = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .build(reader)?;
        let batches = csv.collect::<Result<Vec<_>, _>>()?;
        let batch = compute::concat_batches(&schema, &batches)?;
        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Returns whether a column with this exact name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    /// Returns the named column with its stored dtype, if present.
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Returns the named column cast to f64, one value per row.
    ///
    /// Null cells decode as NaN. Fails with [`SourceError::NoSuchColumn`]
    /// for an absent column and [`SourceError::ColumnType`] for a column
    /// that cannot be cast to f64.
    pub fn f64_column(&self, name: &str) -> SourceResult<Vec<f64>> {
        let column = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| SourceError::NoSuchColumn {
                name: name.to_string(),
            })?;

        let cast = compute::cast(column, &DataType::Float64).map_err(|_| {
            SourceError::ColumnType {
                name: name.to_string(),
                dtype: column.data_type().to_string(),
            }
        })?;

        let values = cast
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| SourceError::ColumnType {
                name: name.to_string(),
                dtype: column.data_type().to_string(),
            })?;

        Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Returns the single-row sub-table at `index`.
    pub fn row(&self, index: usize) -> SourceResult<DetectionTable> {
        if index >= self.num_rows() {
            return Err(SourceError::RowOutOfBounds {
                index,
                len: self.num_rows(),
            });
        }
        Ok(Self::new(self.batch.slice(index, 1)))
    }

    /// Returns the contiguous sub-table covering `range`.
    pub fn rows(&self, range: Range<usize>) -> SourceResult<DetectionTable> {
        if range.start > range.end || range.end > self.num_rows() {
            return Err(SourceError::RowOutOfBounds {
                index: range.end,
                len: self.num_rows(),
            });
        }
        Ok(Self::new(
            self.batch.slice(range.start, range.end - range.start),
        ))
    }

    /// Borrows the underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}
