//! Yahoo Finance price source.

use std::fmt;

use chrono::{DateTime, NaiveTime};
use stockbeta_primitives::{Date, DateRange, PriceSeries, Symbol};
use stockbeta_traits::{PriceSource, SourceError};
use time::OffsetDateTime;
use tracing::{debug, info};
use yahoo_finance_api as yahoo;

/// Daily adjusted closes from Yahoo Finance.
pub struct YahooPriceSource {
    connector: yahoo::YahooConnector,
}

impl fmt::Debug for YahooPriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YahooPriceSource").finish_non_exhaustive()
    }
}

impl YahooPriceSource {
    /// Create a source with a fresh connector.
    ///
    /// # Errors
    /// Returns `SourceError::Network` if the connector cannot be built.
    pub fn new() -> Result<Self, SourceError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self { connector })
    }
}

impl PriceSource for YahooPriceSource {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    /// Quotes are dated in the listing exchange's time zone, using the
    /// `gmtoffset` Yahoo reports for the symbol. The request is padded by a
    /// day on each side so sessions east or west of UTC are not cut off.
    async fn fetch(&self, symbol: &Symbol, range: DateRange) -> Result<PriceSeries, SourceError> {
        let start = range.start().pred_opt().unwrap_or(range.start());
        // Yahoo's end bound is exclusive.
        let end = range.end().succ_opt().and_then(|d| d.succ_opt()).unwrap_or(range.end());
        info!(%symbol, %range, "fetching adjusted closes");

        let response = self
            .connector
            .get_quote_history(symbol.as_str(), to_offset(start)?, to_offset(end)?)
            .await
            .map_err(|e| SourceError::Network(format!("{symbol}: {e}")))?;
        let quotes =
            response.quotes().map_err(|e| SourceError::NoData(format!("{symbol}: {e}")))?;
        let utc_offset = response.metadata().map_or(0, |meta| i64::from(meta.gmtoffset));
        debug!(%symbol, quotes = quotes.len(), utc_offset, "received quotes");

        closes_in_range(symbol, quotes.iter().map(|q| (q.timestamp, q.adjclose)), utc_offset, range)
    }
}

fn to_offset(date: Date) -> Result<OffsetDateTime, SourceError> {
    let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| SourceError::Malformed(format!("date {date} out of range: {e}")))
}

/// Build a price series from `(unix seconds, adjusted close)` pairs.
///
/// Each quote is dated by its exchange-local calendar day: `utc_offset` is
/// the exchange's offset from UTC in seconds. Quotes outside `range` are
/// dropped, as are repeated quotes for a date already seen (Yahoo may append
/// a live quote for the current session).
fn closes_in_range(
    symbol: &Symbol,
    quotes: impl IntoIterator<Item = (i64, f64)>,
    utc_offset: i64,
    range: DateRange,
) -> Result<PriceSeries, SourceError> {
    let mut dates: Vec<Date> = Vec::new();
    let mut closes = Vec::new();

    for (timestamp, close) in quotes {
        let date = timestamp
            .checked_add(utc_offset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .map(|dt| dt.date_naive())
            .ok_or_else(|| SourceError::Malformed(format!("{symbol}: bad timestamp {timestamp}")))?;
        if !range.contains(date) || dates.last().is_some_and(|last| date <= *last) {
            continue;
        }
        dates.push(date);
        closes.push(close);
    }

    if dates.is_empty() {
        return Err(SourceError::NoData(format!("{symbol}: no prices in {range}")));
    }
    Ok(PriceSeries::from_vec(dates, closes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> Date {
        Date::from_ymd_opt(2021, m, d).unwrap()
    }

    /// New York, winter.
    const EST: i64 = -5 * 3600;

    /// Regular session open, 14:30 UTC.
    fn open(date: Date) -> i64 {
        date.and_hms_opt(14, 30, 0).unwrap().and_utc().timestamp()
    }

    #[test]
    fn keeps_quotes_inside_range() {
        let range = DateRange::new(date(1, 5), date(1, 6)).unwrap();
        let quotes = [
            (open(date(1, 4)), 129.41),
            (open(date(1, 5)), 131.01),
            (open(date(1, 6)), 126.60),
            (open(date(1, 7)), 130.92),
        ];
        let prices = closes_in_range(&Symbol::new("AAPL"), quotes, EST, range).unwrap();
        assert_eq!(prices.dates(), &[date(1, 5), date(1, 6)]);
        assert_eq!(prices.values().to_vec(), vec![131.01, 126.60]);
    }

    #[test]
    fn drops_repeated_session() {
        let range = DateRange::new(date(1, 4), date(1, 5)).unwrap();
        let quotes = [
            (open(date(1, 4)), 129.41),
            (open(date(1, 5)), 131.01),
            (open(date(1, 5)) + 3600, 131.50),
        ];
        let prices = closes_in_range(&Symbol::new("AAPL"), quotes, EST, range).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.values()[1], 131.01);
    }

    #[test]
    fn no_quotes_is_no_data() {
        let range = DateRange::new(date(1, 4), date(1, 5)).unwrap();
        let err = closes_in_range(&Symbol::new("ZZZZ"), Vec::new(), EST, range).unwrap_err();
        assert!(matches!(err, SourceError::NoData(ref msg) if msg.starts_with("ZZZZ")));
    }

    #[test]
    fn quotes_are_dated_in_exchange_time() {
        // ASX opens 10:00 AEDT, which is 23:00 UTC on the previous day.
        let aedt = 11 * 3600;
        let sydney_open = |date: Date| date.and_hms_opt(23, 0, 0).unwrap().and_utc().timestamp();
        let range = DateRange::new(date(1, 5), date(1, 6)).unwrap();
        let quotes = [(sydney_open(date(1, 4)), 86.35), (sydney_open(date(1, 5)), 87.10)];

        let prices = closes_in_range(&Symbol::new("BHP.AX"), quotes, aedt, range).unwrap();
        assert_eq!(prices.dates(), &[date(1, 5), date(1, 6)]);

        // Read as UTC the first session lands on the 4th, outside the range.
        let utc = closes_in_range(&Symbol::new("BHP.AX"), quotes, 0, range).unwrap();
        assert_eq!(utc.dates(), &[date(1, 5)]);
        assert_eq!(utc.values()[0], 87.10);
    }

    #[test]
    fn offsets_are_utc_midnight() {
        let offset = to_offset(date(1, 4)).unwrap();
        assert_eq!(offset.unix_timestamp(), 1_609_718_400);
    }
}
