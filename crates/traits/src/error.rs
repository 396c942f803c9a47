//! Errors shared by data sources.

use stockbeta_primitives::SeriesError;

/// Errors that can occur while fetching prices or factors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The remote service could not be reached or refused the request.
    #[error("network error: {0}")]
    Network(String),

    /// The payload arrived but could not be parsed.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// The source has nothing for the requested symbol or range.
    #[error("no data: {0}")]
    NoData(String),

    /// Parsed values do not form a valid series.
    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),

    /// Local file access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Returns whether another source may still succeed where this one failed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Malformed(_) | Self::NoData(_))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn source_error_is_recoverable() {
        assert!(SourceError::Network("connection refused".to_string()).is_recoverable());
        assert!(SourceError::Malformed("missing header".to_string()).is_recoverable());
        assert!(SourceError::NoData("2030-01-01 to 2030-12-31".to_string()).is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "factors.csv");
        assert!(!SourceError::from(io).is_recoverable());

        let date = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        assert!(!SourceError::from(SeriesError::NonFinite(date)).is_recoverable());
    }

    #[test]
    fn source_error_display() {
        let err = SourceError::NoData("AAPL".to_string());
        assert_eq!(err.to_string(), "no data: AAPL");

        let date = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let err = SourceError::from(SeriesError::NonFinite(date));
        assert_eq!(err.to_string(), "invalid series: non-finite value on 2021-01-04");
    }
}
