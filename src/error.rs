use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("TAP service {service:?} could not be located")]
    Connection { service: String },

    #[error(transparent)]
    Remote(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] arrow::error::ArrowError),

    #[error("No column or alias named {name:?}")]
    NoSuchColumn { name: String },

    #[error("Column {name:?} has non-numeric type {dtype}")]
    ColumnType { name: String, dtype: String },

    #[error("Row index {index} out of bounds (rows: {len})")]
    RowOutOfBounds { index: usize, len: usize },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
