//! Error types for data loading and alignment.

use polars::error::PolarsError;
use stockbeta_primitives::SeriesError;
use stockbeta_traits::SourceError;

/// Errors that can occur while parsing, writing or aligning tabular data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Parsed values do not form a valid series.
    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),

    /// File access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A cell or layout that cannot be interpreted.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// Stock returns and factors share no dates.
    #[error("no overlapping dates between {stock} stock returns and {factors} factor rows")]
    EmptyAlignment {
        /// Number of stock return observations.
        stock: usize,
        /// Number of factor rows.
        factors: usize,
    },
}

impl From<DataError> for SourceError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Io(err) => Self::Io(err),
            DataError::Series(err) => Self::Series(err),
            other => Self::Malformed(other.to_string()),
        }
    }
}
