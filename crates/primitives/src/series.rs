//! Date-indexed price and return series.

use ndarray::Array1;

use crate::{Date, DateRange};

/// Errors raised when building date-indexed containers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Dates and values have different lengths.
    #[error("length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values.
        values: usize,
    },

    /// Dates are not strictly ascending (includes duplicates).
    #[error("dates must be strictly ascending: {next} follows {previous}")]
    UnsortedDates {
        /// Earlier position in the index.
        previous: Date,
        /// The offending date.
        next: Date,
    },

    /// A value is NaN or infinite.
    #[error("non-finite value on {0}")]
    NonFinite(Date),

    /// A price that cannot anchor a percentage change.
    #[error("non-positive price {price} on {date}")]
    NonPositivePrice {
        /// Date of the price.
        date: Date,
        /// The price.
        price: f64,
    },

    /// Range start after range end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested start.
        start: Date,
        /// Requested end.
        end: Date,
    },
}

/// Check that `dates` is strictly ascending and pairs one-to-one with finite `values`.
pub(crate) fn validate_index(dates: &[Date], values: &Array1<f64>) -> Result<(), SeriesError> {
    if dates.len() != values.len() {
        return Err(SeriesError::LengthMismatch { dates: dates.len(), values: values.len() });
    }
    for pair in dates.windows(2) {
        if pair[1] <= pair[0] {
            return Err(SeriesError::UnsortedDates { previous: pair[0], next: pair[1] });
        }
    }
    if let Some((date, _)) = dates.iter().zip(values.iter()).find(|(_, v)| !v.is_finite()) {
        return Err(SeriesError::NonFinite(*date));
    }
    Ok(())
}

/// First and last of ascending `dates`, or `None` when empty.
pub(crate) fn span(dates: &[Date]) -> Option<DateRange> {
    match (dates.first(), dates.last()) {
        (Some(&start), Some(&end)) => DateRange::new(start, end).ok(),
        _ => None,
    }
}

/// Daily fractional returns (0.01 == 1%), indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<Date>,
    values: Array1<f64>,
}

impl ReturnSeries {
    /// Create a return series.
    ///
    /// # Errors
    /// Returns [`SeriesError`] if the lengths differ, the dates are not
    /// strictly ascending, or a value is not finite.
    pub fn new(dates: Vec<Date>, values: Array1<f64>) -> Result<Self, SeriesError> {
        validate_index(&dates, &values)?;
        Ok(Self { dates, values })
    }

    /// Create a return series from a plain vector of values.
    ///
    /// # Errors
    /// See [`ReturnSeries::new`].
    pub fn from_vec(dates: Vec<Date>, values: Vec<f64>) -> Result<Self, SeriesError> {
        Self::new(dates, Array1::from_vec(values))
    }

    /// An empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self { dates: Vec::new(), values: Array1::zeros(0) }
    }

    /// Dates of the series.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return values.
    #[must_use]
    pub const fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Return observed on `date`, if any.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.dates.binary_search(&date).ok().map(|i| self.values[i])
    }

    /// First and last date, or `None` when empty.
    #[must_use]
    pub fn span(&self) -> Option<DateRange> {
        span(&self.dates)
    }

    /// Iterate over `(date, return)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

/// Daily prices (typically adjusted close), indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<Date>,
    values: Array1<f64>,
}

impl PriceSeries {
    /// Create a price series.
    ///
    /// # Errors
    /// Returns [`SeriesError`] if the lengths differ, the dates are not
    /// strictly ascending, or a value is not finite.
    pub fn new(dates: Vec<Date>, values: Array1<f64>) -> Result<Self, SeriesError> {
        validate_index(&dates, &values)?;
        Ok(Self { dates, values })
    }

    /// Create a price series from a plain vector of values.
    ///
    /// # Errors
    /// See [`PriceSeries::new`].
    pub fn from_vec(dates: Vec<Date>, values: Vec<f64>) -> Result<Self, SeriesError> {
        Self::new(dates, Array1::from_vec(values))
    }

    /// Dates of the series.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Price values.
    #[must_use]
    pub const fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First and last date, or `None` when empty.
    #[must_use]
    pub fn span(&self) -> Option<DateRange> {
        span(&self.dates)
    }

    /// Simple percentage change between consecutive prices.
    ///
    /// The first observation has no predecessor and is dropped, so the result
    /// is one element shorter than `self` (empty for fewer than two prices).
    ///
    /// # Errors
    /// Returns [`SeriesError::NonPositivePrice`] if a price used as the base of
    /// a change is zero or negative.
    pub fn pct_change(&self) -> Result<ReturnSeries, SeriesError> {
        if self.len() < 2 {
            return Ok(ReturnSeries::empty());
        }

        let mut returns = Vec::with_capacity(self.len() - 1);
        for i in 1..self.len() {
            let prev = self.values[i - 1];
            if prev <= 0.0 {
                return Err(SeriesError::NonPositivePrice { date: self.dates[i - 1], price: prev });
            }
            returns.push((self.values[i] - prev) / prev);
        }

        ReturnSeries::from_vec(self.dates[1..].to_vec(), returns)
    }
}
