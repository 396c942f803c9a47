//! Fama-French three-factor table.

use std::{fmt, str::FromStr};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{
    Date, DateRange, SeriesError,
    series::{self, validate_index},
};

/// A column of the three-factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorColumn {
    /// Market return in excess of the risk-free rate.
    #[serde(rename = "Mkt-RF")]
    MktRf,
    /// Small Minus Big (size).
    #[serde(rename = "SMB")]
    Smb,
    /// High Minus Low (value).
    #[serde(rename = "HML")]
    Hml,
    /// Risk-free rate.
    #[serde(rename = "RF")]
    Rf,
}

impl FactorColumn {
    /// All columns, in the order they appear in the data library files.
    pub const ALL: [Self; 4] = [Self::MktRf, Self::Smb, Self::Hml, Self::Rf];

    /// Canonical column label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MktRf => "Mkt-RF",
            Self::Smb => "SMB",
            Self::Hml => "HML",
            Self::Rf => "RF",
        }
    }
}

impl fmt::Display for FactorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FactorColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown factor column: {s}"))
    }
}

/// Daily factor returns, decimal-scaled, indexed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    dates: Vec<Date>,
    mkt_rf: Array1<f64>,
    smb: Array1<f64>,
    hml: Array1<f64>,
    rf: Array1<f64>,
}

impl FactorTable {
    /// Create a factor table.
    ///
    /// # Errors
    /// Returns [`SeriesError`] if any column length differs from the number of
    /// dates, the dates are not strictly ascending, or a value is not finite.
    pub fn new(
        dates: Vec<Date>,
        mkt_rf: Array1<f64>,
        smb: Array1<f64>,
        hml: Array1<f64>,
        rf: Array1<f64>,
    ) -> Result<Self, SeriesError> {
        for column in [&mkt_rf, &smb, &hml, &rf] {
            validate_index(&dates, column)?;
        }
        Ok(Self { dates, mkt_rf, smb, hml, rf })
    }

    /// Dates of the table.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Values of a single column.
    #[must_use]
    pub const fn column(&self, column: FactorColumn) -> &Array1<f64> {
        match column {
            FactorColumn::MktRf => &self.mkt_rf,
            FactorColumn::Smb => &self.smb,
            FactorColumn::Hml => &self.hml,
            FactorColumn::Rf => &self.rf,
        }
    }

    /// Column labels.
    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        FactorColumn::ALL.iter().map(FactorColumn::name).collect()
    }

    /// Number of rows.
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
        series::span(&self.dates)
    }

    /// Factor values on `date`, in [`FactorColumn::ALL`] order.
    #[must_use]
    pub fn row(&self, date: Date) -> Option<[f64; 4]> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| [self.mkt_rf[i], self.smb[i], self.hml[i], self.rf[i]])
    }

    /// Rows whose date falls inside `range`.
    #[must_use]
    pub fn filter_range(&self, range: DateRange) -> Self {
        let lo = self.dates.partition_point(|d| *d < range.start());
        let hi = self.dates.partition_point(|d| *d <= range.end());
        let slice = |a: &Array1<f64>| a.slice(ndarray::s![lo..hi]).to_owned();

        Self {
            dates: self.dates[lo..hi].to_vec(),
            mkt_rf: slice(&self.mkt_rf),
            smb: slice(&self.smb),
            hml: slice(&self.hml),
            rf: slice(&self.rf),
        }
    }
}
