//! Date alignment of stock returns and factor rows.

use polars::prelude::*;
use stockbeta_primitives::{Date, DateRange, FactorColumn, FactorTable, ReturnSeries};
use tracing::debug;

use crate::{
    DataError,
    frame::{DATE_COLUMN, column, float_values},
};

const STOCK_COLUMN: &str = "stock";

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Stock returns and factor rows on the same ascending dates.
#[derive(Debug, Clone)]
pub struct AlignedReturns {
    returns: ReturnSeries,
    factors: FactorTable,
}

impl AlignedReturns {
    /// Stock returns on the shared dates.
    #[must_use]
    pub const fn returns(&self) -> &ReturnSeries {
        &self.returns
    }

    /// Factor rows on the shared dates.
    #[must_use]
    pub const fn factors(&self) -> &FactorTable {
        &self.factors
    }

    /// Number of shared dates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.returns.len()
    }

    /// Always false for a value built by [`align`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// First and last shared date.
    #[must_use]
    pub fn span(&self) -> Option<DateRange> {
        self.returns.span()
    }

    /// Split into returns and factors.
    #[must_use]
    pub fn into_parts(self) -> (ReturnSeries, FactorTable) {
        (self.returns, self.factors)
    }
}

/// Inner-join stock returns with factor rows on date, ascending.
///
/// # Errors
/// Returns `DataError::EmptyAlignment` if no date is shared.
pub fn align(stock: &ReturnSeries, factors: &FactorTable) -> Result<AlignedReturns, DataError> {
    let stock_df = DataFrame::new(vec![
        Column::new(DATE_COLUMN.into(), stock.dates().to_vec()),
        Column::new(STOCK_COLUMN.into(), stock.values().to_vec()),
    ])?;

    let mut factor_columns = vec![Column::new(DATE_COLUMN.into(), factors.dates().to_vec())];
    for factor in FactorColumn::ALL {
        factor_columns.push(Column::new(factor.name().into(), factors.column(factor).to_vec()));
    }
    let factor_df = DataFrame::new(factor_columns)?;

    let joined = stock_df
        .lazy()
        .join(
            factor_df.lazy(),
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;

    if joined.height() == 0 {
        return Err(DataError::EmptyAlignment { stock: stock.len(), factors: factors.len() });
    }
    debug!(
        stock = stock.len(),
        factors = factors.len(),
        aligned = joined.height(),
        "aligned stock returns with factors"
    );

    let dates = date_values(&joined)?;
    let returns = ReturnSeries::new(dates.clone(), float_values(&joined, STOCK_COLUMN, 1.0)?)?;
    let factors = FactorTable::new(
        dates,
        float_values(&joined, FactorColumn::MktRf.name(), 1.0)?,
        float_values(&joined, FactorColumn::Smb.name(), 1.0)?,
        float_values(&joined, FactorColumn::Hml.name(), 1.0)?,
        float_values(&joined, FactorColumn::Rf.name(), 1.0)?,
    )?;

    Ok(AlignedReturns { returns, factors })
}

fn date_values(df: &DataFrame) -> Result<Vec<Date>, DataError> {
    let days = column(df, DATE_COLUMN)?.cast(&DataType::Int32)?;
    days.i32()?
        .into_iter()
        .map(|d| {
            d.and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
                .ok_or_else(|| DataError::Malformed("missing date after join".to_string()))
        })
        .collect()
}
