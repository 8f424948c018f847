use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Anything that goes wrong while reading a table from disk.
///
/// Missing files, permission problems and corrupt content all end up here.
/// The variants only exist to keep the underlying message; nothing downstream
/// branches on them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parquet(#[from] ParquetError),

    #[error("{0}")]
    Arrow(#[from] ArrowError),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Malformed(String),
}

pub type LoadResult<T> = Result<T, LoadError>;
