//! Price and factor source traits.

use std::future::Future;

use stockbeta_primitives::{DateRange, FactorTable, PriceSeries, Symbol};

use crate::SourceError;

/// A provider of daily adjusted closing prices.
pub trait PriceSource: Send + Sync {
    /// Short human-readable name used in logs and reports.
    fn name(&self) -> &str;

    /// Fetch adjusted closes for `symbol` on every trading day in `range`
    /// (both ends inclusive), in ascending date order.
    ///
    /// # Errors
    /// Returns `SourceError::NoData` when the symbol has no prices in the
    /// range, and `SourceError::Network` or `SourceError::Malformed` when the
    /// provider fails.
    fn fetch(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> impl Future<Output = Result<PriceSeries, SourceError>> + Send;
}

/// A provider of the daily three-factor table.
pub trait FactorSource: Send + Sync {
    /// Short human-readable name used in logs and reports.
    fn name(&self) -> &str;

    /// Fetch factor rows dated within `range` (both ends inclusive).
    ///
    /// # Errors
    /// Returns `SourceError::NoData` when no rows fall inside the range.
    fn fetch(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<FactorTable, SourceError>> + Send;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    struct ConstantPrices;

    impl PriceSource for ConstantPrices {
        fn name(&self) -> &str {
            "constant"
        }

        async fn fetch(
            &self,
            symbol: &Symbol,
            range: DateRange,
        ) -> Result<PriceSeries, SourceError> {
            if symbol.is_empty() {
                return Err(SourceError::NoData("empty symbol".to_string()));
            }
            Ok(PriceSeries::from_vec(vec![range.start(), range.end()], vec![100.0, 101.0])?)
        }
    }

    fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 29).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn price_source_fetches_through_trait() {
        let source = ConstantPrices;
        let prices = source.fetch(&Symbol::new("aapl"), january()).await.unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(source.name(), "constant");
    }

    #[tokio::test]
    async fn price_source_reports_missing_data() {
        let err = ConstantPrices.fetch(&Symbol::new(""), january()).await.unwrap_err();
        assert!(err.is_recoverable());
    }
}
